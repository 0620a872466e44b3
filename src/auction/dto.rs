// region:    --- Imports
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::model::{AuctionAggregate, BidRecord, Category, Condition};
use crate::error::ServiceError;

// endregion: --- Imports

// region:    --- Views

/// 목록 카드
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionCard {
    pub id: Uuid,
    pub img_src: Option<String>,
    pub title: String,
    pub num_of_bids: i64,
    pub max_bid: Decimal,
    pub end_date: DateTime<Utc>,
    pub category_name: Category,
}

/// 사용자 경매 이력 테이블 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionTableRow {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub condition: Condition,
    pub current_bid: Decimal,
    pub num_of_bids: i64,
    pub end_date: DateTime<Utc>,
    pub max_bidder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidView {
    pub id: Uuid,
    pub bidder_id: Uuid,
    pub amount: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// 경매 상세
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionFull {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub images: Vec<String>,
    pub starting_price: Decimal,
    pub current_bid: Decimal,
    pub num_of_bids: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub bids: Vec<BidView>,
    pub leading_bid: Option<BidView>,
}

// endregion: --- Views

// region:    --- Mapping

pub fn image_url(image_base_url: &str, image: &str) -> String {
    format!("{}/api/img/{}", image_base_url, image)
}

/// 카드 매핑 (상품 필요)
pub fn map_auction_card(
    aggregate: &AuctionAggregate,
    image_base_url: &str,
) -> Result<AuctionCard, ServiceError> {
    let item = aggregate.item()?;
    let auction = &aggregate.auction;
    Ok(AuctionCard {
        id: auction.id,
        img_src: item
            .images
            .first()
            .map(|image| image_url(image_base_url, image)),
        title: item.name.clone(),
        num_of_bids: auction.bid_count,
        max_bid: auction.current_bid,
        end_date: auction.end_time,
        category_name: item.category,
    })
}

/// 테이블 행 매핑 (상품, 최고 입찰자 필요)
pub fn map_auction_table(aggregate: &AuctionAggregate) -> Result<AuctionTableRow, ServiceError> {
    let item = aggregate.item()?;
    let bidder = aggregate.max_bidder()?;
    let auction = &aggregate.auction;
    Ok(AuctionTableRow {
        id: auction.id,
        title: item.name.clone(),
        category: item.category,
        condition: item.condition,
        current_bid: auction.current_bid,
        num_of_bids: auction.bid_count,
        end_date: auction.end_time,
        max_bidder: (!bidder.is_empty()).then(|| bidder.username.clone()),
    })
}

/// 상세 매핑 (상품, 입찰 목록 필요)
pub fn map_auction_full(
    aggregate: &AuctionAggregate,
    image_base_url: &str,
) -> Result<AuctionFull, ServiceError> {
    let item = aggregate.item()?;
    let bids = aggregate.bids()?;
    let auction = &aggregate.auction;
    Ok(AuctionFull {
        id: auction.id,
        title: item.name.clone(),
        description: item.description.clone(),
        category: item.category,
        condition: item.condition,
        images: item
            .images
            .iter()
            .map(|image| image_url(image_base_url, image))
            .collect(),
        starting_price: auction.starting_price,
        current_bid: auction.current_bid,
        num_of_bids: auction.bid_count,
        start_date: auction.start_time,
        end_date: auction.end_time,
        bids: bids.iter().map(BidView::from).collect(),
        leading_bid: leading_bid(bids).map(BidView::from),
    })
}

/// 최고 금액 입찰, 동일 금액이면 먼저 들어온 입찰
pub fn leading_bid(bids: &[BidRecord]) -> Option<&BidRecord> {
    bids.iter().fold(None, |best: Option<&BidRecord>, bid| match best {
        Some(current) if current.amount >= bid.amount => Some(current),
        _ => Some(bid),
    })
}

impl From<&BidRecord> for BidView {
    fn from(bid: &BidRecord) -> Self {
        BidView {
            id: bid.id,
            bidder_id: bid.bidder_id,
            amount: bid.amount,
            placed_at: bid.placed_at,
        }
    }
}

// endregion: --- Mapping
