// region:    --- Imports
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ServiceError;

// endregion: --- Imports

// region:    --- Enums

/// 상품 카테고리 (닫힌 집합, 와일드카드 없음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Sports,
    Collectibles,
    Art,
    Books,
    Vehicles,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Sports,
        Category::Collectibles,
        Category::Art,
        Category::Books,
        Category::Vehicles,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::Home => "home",
            Category::Sports => "sports",
            Category::Collectibles => "collectibles",
            Category::Art => "art",
            Category::Books => "books",
            Category::Vehicles => "vehicles",
            Category::Other => "other",
        }
    }

    pub fn is_category(token: &str) -> bool {
        token.parse::<Category>().is_ok()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// 상품 상태 (닫힌 집합, 와일드카드 없음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Used,
    Refurbished,
    ForParts,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Used,
        Condition::Refurbished,
        Condition::ForParts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like_new",
            Condition::Used => "used",
            Condition::Refurbished => "refurbished",
            Condition::ForParts => "for_parts",
        }
    }

    pub fn is_condition(token: &str) -> bool {
        token.parse::<Condition>().is_ok()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown condition: {}", s))
    }
}

// endregion: --- Enums

// region:    --- Records

// 경매 모델 (base record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuctionRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub seller_id: Uuid,
    pub starting_price: Decimal,
    pub current_bid: Decimal,
    pub bid_count: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_bidder_id: Option<Uuid>,
}

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub images: Vec<String>,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidRecord {
    pub id: Uuid,
    pub auction_id: Uuid,
    pub bidder_id: Uuid,
    pub amount: Decimal,
    pub placed_at: DateTime<Utc>,
}

// 사용자 모델 (Default 값은 최고 입찰자가 없을 때 쓰는 빈 sentinel)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl UserRecord {
    pub fn is_empty(&self) -> bool {
        self.id.is_nil()
    }
}

// endregion: --- Records

// region:    --- Aggregate

/// 경매 집계 뷰
///
/// 기본 레코드만 가진 집계도 유효하다. 관계는 요청된 경우에만 채워진다.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionAggregate {
    pub auction: AuctionRecord,
    pub item: Option<ItemRecord>,
    pub bids: Option<Vec<BidRecord>>,
    pub max_bidder: Option<UserRecord>,
}

impl AuctionAggregate {
    pub fn new(auction: AuctionRecord) -> Self {
        Self {
            auction,
            item: None,
            bids: None,
            max_bidder: None,
        }
    }

    pub fn item(&self) -> Result<&ItemRecord, ServiceError> {
        self.item
            .as_ref()
            .ok_or(ServiceError::MissingRelation("item"))
    }

    pub fn bids(&self) -> Result<&[BidRecord], ServiceError> {
        self.bids
            .as_deref()
            .ok_or(ServiceError::MissingRelation("bids"))
    }

    pub fn max_bidder(&self) -> Result<&UserRecord, ServiceError> {
        self.max_bidder
            .as_ref()
            .ok_or(ServiceError::MissingRelation("max_bidder"))
    }

    /// 상품의 상태와 카테고리가 주어진 토큰과 정확히 일치하는지 확인
    ///
    /// 상품이 붙지 않은 집계는 어떤 필터와도 일치하지 않는다.
    pub fn item_has(&self, condition: &str, category: &str) -> bool {
        match &self.item {
            Some(item) => item.condition.as_str() == condition && item.category.as_str() == category,
            None => false,
        }
    }
}

// endregion: --- Aggregate
