/// Ledger command handling
/// 1. place bid (validated)
/// 2. cash and credit balance mutations
/// 3. listing termination
// region:    --- Imports
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LedgerError;
use crate::ledger::model::{Bid, Comment, Listing, Watchlist};
use crate::store::LedgerStore;

// endregion: --- Imports

// region:    --- Commands

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBidCommand {
    pub bidder_id: i64,
    /// Bids may be created detached; the floor check only applies when a
    /// listing is attached.
    pub listing_id: Option<i64>,
    pub amount: f64,
}

/// One user/amount pair, shared by the four balance handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceCommand {
    pub user_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndListingCommand {
    pub listing_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentCommand {
    pub author_id: i64,
    pub listing_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchListingCommand {
    pub user_id: i64,
    pub listing_id: i64,
    pub active: bool,
}

// endregion: --- Commands

// region:    --- Command Handlers

/// Validate and persist a bid. Validation failures never reach the store.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    store: &impl LedgerStore,
) -> Result<Bid, LedgerError> {
    info!("{:<12} --> place bid: {:?}", "Command", cmd);

    let bid = Bid {
        id: 0,
        amount: cmd.amount,
        placed_at: Utc::now(),
        winning_bid: false,
        bidder_id: cmd.bidder_id,
        listing_id: cmd.listing_id,
    };

    let floor = match cmd.listing_id {
        Some(listing_id) => {
            let listing = store.listing(listing_id).await?;
            if !listing.active {
                return Err(LedgerError::ListingClosed { listing_id });
            }
            let highest = store.highest_bid(listing_id).await?;
            Some(listing.bid_floor(highest))
        }
        None => None,
    };

    bid.validate(floor)?;
    store.insert_bid(bid).await
}

/// Add to a user's cash balance, returning the new balance.
pub async fn handle_deposit_cash(
    cmd: BalanceCommand,
    store: &impl LedgerStore,
) -> Result<f64, LedgerError> {
    info!("{:<12} --> deposit cash: {:?}", "Command", cmd);
    let mut user = store.user(cmd.user_id).await?;
    let balance = user.deposit_cash(cmd.amount);
    store.save_user_balances(&user).await?;
    Ok(balance)
}

/// Take from a user's cash balance, returning the new balance.
pub async fn handle_withdraw_cash(
    cmd: BalanceCommand,
    store: &impl LedgerStore,
) -> Result<f64, LedgerError> {
    info!("{:<12} --> withdraw cash: {:?}", "Command", cmd);
    let mut user = store.user(cmd.user_id).await?;
    let balance = user.withdraw_cash(cmd.amount);
    store.save_user_balances(&user).await?;
    Ok(balance)
}

/// Grow a user's outstanding credit, returning the new debt balance.
pub async fn handle_use_credit(
    cmd: BalanceCommand,
    store: &impl LedgerStore,
) -> Result<f64, LedgerError> {
    info!("{:<12} --> use credit: {:?}", "Command", cmd);
    let mut user = store.user(cmd.user_id).await?;
    let balance = user.use_credit(cmd.amount);
    store.save_user_balances(&user).await?;
    Ok(balance)
}

/// Pay down a user's credit, returning the new debt balance.
pub async fn handle_pay_credit(
    cmd: BalanceCommand,
    store: &impl LedgerStore,
) -> Result<f64, LedgerError> {
    info!("{:<12} --> pay credit: {:?}", "Command", cmd);
    let mut user = store.user(cmd.user_id).await?;
    let balance = user.pay_credit(cmd.amount);
    store.save_user_balances(&user).await?;
    Ok(balance)
}

/// Close a listing and flag its highest standing bid as the winner.
pub async fn handle_end_listing(
    cmd: EndListingCommand,
    store: &impl LedgerStore,
) -> Result<(Listing, Option<Bid>), LedgerError> {
    info!("{:<12} --> end listing: {:?}", "Command", cmd);
    let mut listing = store.listing(cmd.listing_id).await?;
    listing.end_listing();
    store.save_listing_state(&listing).await?;

    let winner = store.mark_winning_bid(cmd.listing_id).await?;
    if let Some(winning) = &winner {
        info!(
            "{:<12} --> listing {} won by user {} at {}",
            "Command", listing.id, winning.bidder_id, winning.amount
        );
    }
    Ok((listing, winner))
}

/// Attach a comment to a listing.
pub async fn handle_add_comment(
    cmd: AddCommentCommand,
    store: &impl LedgerStore,
) -> Result<Comment, LedgerError> {
    info!(
        "{:<12} --> comment on listing {} by user {}",
        "Command", cmd.listing_id, cmd.author_id
    );
    let comment = Comment {
        id: 0,
        text: cmd.text,
        posted_at: Utc::now(),
        author_id: cmd.author_id,
        listing_id: cmd.listing_id,
    };
    store.insert_comment(comment).await
}

/// Watch or unwatch a listing. Re-watching toggles the existing row
/// instead of inserting a duplicate pair.
pub async fn handle_watch_listing(
    cmd: WatchListingCommand,
    store: &impl LedgerStore,
) -> Result<Watchlist, LedgerError> {
    info!("{:<12} --> watch listing: {:?}", "Command", cmd);
    store
        .set_watch(cmd.user_id, cmd.listing_id, cmd.active)
        .await
}

// endregion: --- Command Handlers
