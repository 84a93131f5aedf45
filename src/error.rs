use thiserror::Error;

/// Errors surfaced by the ledger layer.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A bid amount below zero never reaches the database.
    #[error("bid amount {amount} is negative")]
    NegativeBid { amount: f64 },

    /// A bid on a listing must be at or above the listing floor.
    #[error("bid amount {amount} is below the listing floor {floor}")]
    BidBelowFloor { amount: f64, floor: f64 },

    /// The listing is no longer accepting bids.
    #[error("listing {listing_id} is closed")]
    ListingClosed { listing_id: i64 },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::NegativeBid { .. }
                | LedgerError::BidBelowFloor { .. }
                | LedgerError::ListingClosed { .. }
        )
    }
}
