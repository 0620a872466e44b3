//! 트랜잭션 범위의 조회 저장소
//!
//! 단건 조회는 `Result<Option<T>, StoreError>` 를 돌려준다.
//! `Ok(Some)` 은 조회 성공, `Ok(None)` 은 행 없음, `Err` 는 전송/쿼리 실패이다.
//! 행 없음은 오류가 아니므로 호출자가 명시적으로 hard/soft 여부를 결정한다.

// region:    --- Imports
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::auction::model::{AuctionRecord, BidRecord, ItemRecord, UserRecord};

// endregion: --- Imports

// region:    --- Modules
pub mod postgres;
pub mod queries;

pub use postgres::{PgStore, PgStoreTx};

// endregion: --- Modules

// region:    --- Store Error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row in {table}: {reason}")]
    Decode { table: &'static str, reason: String },
}

// endregion: --- Store Error

// region:    --- Repository Traits

/// 경매 저장소
#[async_trait]
pub trait AuctionRepo: Send {
    async fn get_all(&mut self, offset: i64, len: i64) -> Result<Vec<AuctionRecord>, StoreError>;

    async fn get_all_filtered(
        &mut self,
        offset: i64,
        len: i64,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Vec<AuctionRecord>, StoreError>;

    async fn get_all_by_user_id(
        &mut self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuctionRecord>, StoreError>;

    async fn get_by_id(&mut self, id: Uuid) -> Result<Option<AuctionRecord>, StoreError>;
}

/// 상품 저장소
#[async_trait]
pub trait ItemRepo: Send {
    async fn get_by_id(&mut self, item_id: Uuid) -> Result<Option<ItemRecord>, StoreError>;
}

/// 입찰 저장소
#[async_trait]
pub trait BidRepo: Send {
    /// 경매의 모든 입찰 (저장 순서 유지)
    async fn get_all_for(&mut self, auction: &AuctionRecord) -> Result<Vec<BidRecord>, StoreError>;
}

/// 사용자 저장소
#[async_trait]
pub trait UserRepo: Send {
    async fn get_by_id(&mut self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError>;
}

// endregion: --- Repository Traits

// region:    --- Transaction Scope

/// 하나의 트랜잭션에 묶인 저장소 묶음
#[async_trait]
pub trait StoreTx: Send {
    fn auctions(&mut self) -> &mut dyn AuctionRepo;
    fn items(&mut self) -> &mut dyn ItemRepo;
    fn bids(&mut self) -> &mut dyn BidRepo;
    fn users(&mut self) -> &mut dyn UserRepo;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

/// 트랜잭션 제공자
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;
}

// endregion: --- Transaction Scope
