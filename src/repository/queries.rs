/// 경매 전체 조회 (페이지)
pub const GET_ALL_AUCTIONS: &str = r#"
    SELECT id, item_id, seller_id, starting_price, current_bid, bid_count, start_time, end_time, max_bidder_id
    FROM auctions
    ORDER BY created_at DESC, id
    OFFSET $1
    LIMIT $2
"#;

/// 가격 범위 경매 조회 (페이지)
pub const GET_ALL_AUCTIONS_FILTERED: &str = r#"
    SELECT id, item_id, seller_id, starting_price, current_bid, bid_count, start_time, end_time, max_bidder_id
    FROM auctions
    WHERE current_bid >= $3 AND current_bid <= $4
    ORDER BY created_at DESC, id
    OFFSET $1
    LIMIT $2
"#;

/// 사용자 경매 조회
pub const GET_AUCTIONS_BY_USER_ID: &str = r#"
    SELECT id, item_id, seller_id, starting_price, current_bid, bid_count, start_time, end_time, max_bidder_id
    FROM auctions
    WHERE seller_id = $1
    ORDER BY end_time DESC, id
    LIMIT $2
    OFFSET $3
"#;

/// 경매 조회
pub const GET_AUCTION_BY_ID: &str = "SELECT id, item_id, seller_id, starting_price, current_bid, bid_count, start_time, end_time, max_bidder_id FROM auctions WHERE id = $1";

/// 상품 조회
pub const GET_ITEM_BY_ID: &str =
    "SELECT id, name, description, category, lot_condition, images FROM items WHERE id = $1";

/// 경매 입찰 조회
pub const GET_BIDS_FOR_AUCTION: &str = r#"
    SELECT id, auction_id, bidder_id, amount, placed_at
    FROM bids
    WHERE auction_id = $1
    ORDER BY placed_at ASC, id
"#;

/// 사용자 조회
pub const GET_USER_BY_ID: &str = "SELECT id, username, email FROM users WHERE id = $1";
