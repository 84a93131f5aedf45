use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;

// region:    --- User

/// Account record carrying the two balances the ledger mutates.
/// `cash` stays non-negative at the schema level; `credit` is outstanding
/// debt and runs negative when overpaid.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    pub cash: f64,
    pub credit: f64,
}

impl User {
    /// Add to the cash balance, returning the new balance.
    pub fn deposit_cash(&mut self, amount: f64) -> f64 {
        self.cash += amount;
        self.cash
    }

    /// Take from the cash balance, returning the new balance. No floor is
    /// enforced here; the schema CHECK rejects an overdraft at save time.
    pub fn withdraw_cash(&mut self, amount: f64) -> f64 {
        self.cash -= amount;
        self.cash
    }

    /// Put an amount on credit, growing the outstanding debt.
    pub fn use_credit(&mut self, amount: f64) -> f64 {
        self.credit += amount;
        self.credit
    }

    /// Pay down the outstanding debt. Overpaying drives the balance
    /// negative, a credit owed back to the user.
    pub fn pay_credit(&mut self, amount: f64) -> f64 {
        self.credit -= amount;
        self.credit
    }
}

// endregion: --- User

// region:    --- Listing

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub active: bool,
    pub start_price: f64,
    pub auction_start: DateTime<Utc>,
    pub auction_end: DateTime<Utc>,
    pub owner_id: i64,
}

impl Listing {
    /// Minimum acceptable bid: the highest standing bid when one exists,
    /// otherwise the start price.
    pub fn bid_floor(&self, current_highest: Option<f64>) -> f64 {
        match current_highest {
            Some(highest) => highest.max(self.start_price),
            None => self.start_price,
        }
    }

    /// Close the listing. Unconditional: calling before `auction_end` still
    /// deactivates it.
    pub fn end_listing(&mut self) {
        if Utc::now() < self.auction_end {
            debug!(
                "{:<12} --> listing {} ended before its auction_end",
                "Model", self.id
            );
        }
        self.active = false;
    }
}

// endregion: --- Listing

// region:    --- Bid

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
    pub winning_bid: bool,
    pub bidder_id: i64,
    pub listing_id: Option<i64>,
}

impl Bid {
    /// Field-level validation, run before the bid reaches the database.
    /// The negative check applies to every bid; the floor check only when
    /// the bid is attached to a listing.
    pub fn validate(&self, floor: Option<f64>) -> Result<(), LedgerError> {
        if self.amount < 0.0 {
            return Err(LedgerError::NegativeBid {
                amount: self.amount,
            });
        }
        if let Some(floor) = floor {
            if self.amount < floor {
                return Err(LedgerError::BidBelowFloor {
                    amount: self.amount,
                    floor,
                });
            }
        }
        Ok(())
    }
}

// endregion: --- Bid

// region:    --- Comment

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    pub author_id: i64,
    pub listing_id: i64,
}

// endregion: --- Comment

// region:    --- Watchlist

/// Join of a user and a listing they follow.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Watchlist {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: i64,
    pub active: bool,
}

// endregion: --- Watchlist
