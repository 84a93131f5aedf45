// region:    --- Imports
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::error::LedgerError;
use crate::ledger::model::{Bid, Comment, Listing, User, Watchlist};

// endregion: --- Imports

// region:    --- Ledger Store Trait

/// Persistence seam for the ledger. Commands only ever touch the database
/// through this trait, so tests can swap in an in-memory double.
#[async_trait]
pub trait LedgerStore {
    async fn user(&self, id: i64) -> Result<User, LedgerError>;
    async fn save_user_balances(&self, user: &User) -> Result<(), LedgerError>;

    async fn listing(&self, id: i64) -> Result<Listing, LedgerError>;
    async fn save_listing_state(&self, listing: &Listing) -> Result<(), LedgerError>;

    async fn highest_bid(&self, listing_id: i64) -> Result<Option<f64>, LedgerError>;
    async fn insert_bid(&self, bid: Bid) -> Result<Bid, LedgerError>;
    /// Flag the highest standing bid on a listing as the winning bid.
    async fn mark_winning_bid(&self, listing_id: i64) -> Result<Option<Bid>, LedgerError>;

    async fn insert_comment(&self, comment: Comment) -> Result<Comment, LedgerError>;
    async fn set_watch(
        &self,
        user_id: i64,
        listing_id: i64,
        active: bool,
    ) -> Result<Watchlist, LedgerError>;
}

// endregion: --- Ledger Store Trait

// region:    --- Postgres Ledger Store

pub struct PostgresLedgerStore {
    pool: Arc<PgPool>,
}

impl PostgresLedgerStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn user(&self, id: i64) -> Result<User, LedgerError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, first_name, last_name, email, password, is_active, cash, credit
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(LedgerError::NotFound { kind: "user", id })
    }

    async fn save_user_balances(&self, user: &User) -> Result<(), LedgerError> {
        sqlx::query("UPDATE users SET cash = $1, credit = $2 WHERE id = $3")
            .bind(user.cash)
            .bind(user.credit)
            .bind(user.id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn listing(&self, id: i64) -> Result<Listing, LedgerError> {
        sqlx::query_as::<_, Listing>(
            "SELECT id, slug, title, description, image, active, start_price,
                    auction_start, auction_end, owner_id
             FROM listings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(LedgerError::NotFound { kind: "listing", id })
    }

    async fn save_listing_state(&self, listing: &Listing) -> Result<(), LedgerError> {
        sqlx::query("UPDATE listings SET active = $1, auction_end = $2 WHERE id = $3")
            .bind(listing.active)
            .bind(listing.auction_end)
            .bind(listing.id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn highest_bid(&self, listing_id: i64) -> Result<Option<f64>, LedgerError> {
        let highest = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT MAX(amount) FROM bids WHERE listing_id = $1",
        )
        .bind(listing_id)
        .fetch_one(&*self.pool)
        .await?;
        Ok(highest)
    }

    async fn insert_bid(&self, bid: Bid) -> Result<Bid, LedgerError> {
        let inserted = sqlx::query_as::<_, Bid>(
            "INSERT INTO bids (amount, placed_at, winning_bid, bidder_id, listing_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, amount, placed_at, winning_bid, bidder_id, listing_id",
        )
        .bind(bid.amount)
        .bind(bid.placed_at)
        .bind(bid.winning_bid)
        .bind(bid.bidder_id)
        .bind(bid.listing_id)
        .fetch_one(&*self.pool)
        .await?;
        info!(
            "{:<12} --> bid {} saved for listing {:?}",
            "Store", inserted.id, inserted.listing_id
        );
        Ok(inserted)
    }

    async fn mark_winning_bid(&self, listing_id: i64) -> Result<Option<Bid>, LedgerError> {
        let winner = sqlx::query_as::<_, Bid>(
            "UPDATE bids SET winning_bid = TRUE
             WHERE id = (
                 SELECT id FROM bids
                 WHERE listing_id = $1
                 ORDER BY amount DESC, placed_at ASC
                 LIMIT 1
             )
             RETURNING id, amount, placed_at, winning_bid, bidder_id, listing_id",
        )
        .bind(listing_id)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(winner)
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment, LedgerError> {
        let inserted = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (text, posted_at, author_id, listing_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, text, posted_at, author_id, listing_id",
        )
        .bind(&comment.text)
        .bind(comment.posted_at)
        .bind(comment.author_id)
        .bind(comment.listing_id)
        .fetch_one(&*self.pool)
        .await?;
        Ok(inserted)
    }

    async fn set_watch(
        &self,
        user_id: i64,
        listing_id: i64,
        active: bool,
    ) -> Result<Watchlist, LedgerError> {
        let watch = sqlx::query_as::<_, Watchlist>(
            "INSERT INTO watchlists (user_id, listing_id, active)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, listing_id) DO UPDATE SET active = EXCLUDED.active
             RETURNING id, user_id, listing_id, active",
        )
        .bind(user_id)
        .bind(listing_id)
        .bind(active)
        .fetch_one(&*self.pool)
        .await?;
        Ok(watch)
    }
}

// endregion: --- Postgres Ledger Store
