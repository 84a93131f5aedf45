/// User lookup
pub const GET_USER: &str = "SELECT id, username, first_name, last_name, email, password, is_active, cash, credit FROM users WHERE id = $1";

/// Listing lookup
pub const GET_LISTING: &str = "SELECT id, slug, title, description, image, active, start_price, auction_start, auction_end, owner_id FROM listings WHERE id = $1";

/// Open listings, newest auction first
pub const GET_ACTIVE_LISTINGS: &str = r#"
    SELECT id, slug, title, description, image, active, start_price, auction_start, auction_end, owner_id
    FROM listings
    WHERE active = TRUE
    ORDER BY auction_start DESC
"#;

/// Bid history for a listing
pub const GET_LISTING_BIDS: &str = r#"
    SELECT id, amount, placed_at, winning_bid, bidder_id, listing_id
    FROM bids
    WHERE listing_id = $1
    ORDER BY placed_at DESC
"#;

/// Highest standing bid on a listing
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(amount) as highest_bid FROM bids WHERE listing_id = $1";

/// Comment thread for a listing
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT id, text, posted_at, author_id, listing_id
    FROM comments
    WHERE listing_id = $1
    ORDER BY posted_at ASC
"#;

/// Listings a user is actively watching
pub const GET_USER_WATCHLIST: &str = r#"
    SELECT id, user_id, listing_id, active
    FROM watchlists
    WHERE user_id = $1 AND active = TRUE
"#;
