// region:    --- Imports
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::queries;
use super::{AuctionRepo, BidRepo, ItemRepo, Store, StoreError, StoreTx, UserRepo};
use crate::auction::model::{AuctionRecord, BidRecord, ItemRecord, UserRecord};
use crate::database::DatabaseManager;

// endregion: --- Imports

// region:    --- Rows

// 상품 테이블 행 (enum 컬럼은 TEXT 로 저장)
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: String,
    category: String,
    lot_condition: String,
    images: Vec<String>,
}

impl TryFrom<ItemRow> for ItemRecord {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let decode = |reason: String| StoreError::Decode {
            table: "items",
            reason,
        };
        Ok(ItemRecord {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category.parse().map_err(decode)?,
            condition: row.lot_condition.parse().map_err(decode)?,
            images: row.images,
        })
    }
}

// endregion: --- Rows

// region:    --- Postgres Store

/// Postgres 트랜잭션 제공자
#[derive(Clone)]
pub struct PgStore {
    db_manager: Arc<DatabaseManager>,
}

impl PgStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let tx = self.db_manager.pool().begin().await?;
        Ok(Box::new(PgStoreTx { tx }))
    }
}

/// 하나의 Postgres 트랜잭션 위에서 동작하는 저장소 묶음
pub struct PgStoreTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgStoreTx {
    fn auctions(&mut self) -> &mut dyn AuctionRepo {
        self
    }

    fn items(&mut self) -> &mut dyn ItemRepo {
        self
    }

    fn bids(&mut self) -> &mut dyn BidRepo {
        self
    }

    fn users(&mut self) -> &mut dyn UserRepo {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

// endregion: --- Postgres Store

// region:    --- Repositories

#[async_trait]
impl AuctionRepo for PgStoreTx {
    async fn get_all(&mut self, offset: i64, len: i64) -> Result<Vec<AuctionRecord>, StoreError> {
        debug!("{:<12} --> 경매 전체 조회 offset: {}, len: {}", "Store", offset, len);
        let auctions = sqlx::query_as::<_, AuctionRecord>(queries::GET_ALL_AUCTIONS)
            .bind(offset)
            .bind(len)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(auctions)
    }

    async fn get_all_filtered(
        &mut self,
        offset: i64,
        len: i64,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Vec<AuctionRecord>, StoreError> {
        debug!(
            "{:<12} --> 가격 범위 경매 조회 offset: {}, len: {}, {}..={}",
            "Store", offset, len, min_price, max_price
        );
        let auctions = sqlx::query_as::<_, AuctionRecord>(queries::GET_ALL_AUCTIONS_FILTERED)
            .bind(offset)
            .bind(len)
            .bind(min_price)
            .bind(max_price)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(auctions)
    }

    async fn get_all_by_user_id(
        &mut self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuctionRecord>, StoreError> {
        debug!("{:<12} --> 사용자 경매 조회 user: {}", "Store", user_id);
        let auctions = sqlx::query_as::<_, AuctionRecord>(queries::GET_AUCTIONS_BY_USER_ID)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(auctions)
    }

    async fn get_by_id(&mut self, id: Uuid) -> Result<Option<AuctionRecord>, StoreError> {
        let auction = sqlx::query_as::<_, AuctionRecord>(queries::GET_AUCTION_BY_ID)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(auction)
    }
}

#[async_trait]
impl ItemRepo for PgStoreTx {
    async fn get_by_id(&mut self, item_id: Uuid) -> Result<Option<ItemRecord>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::GET_ITEM_BY_ID)
            .bind(item_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.map(ItemRecord::try_from).transpose()
    }
}

#[async_trait]
impl BidRepo for PgStoreTx {
    async fn get_all_for(&mut self, auction: &AuctionRecord) -> Result<Vec<BidRecord>, StoreError> {
        let bids = sqlx::query_as::<_, BidRecord>(queries::GET_BIDS_FOR_AUCTION)
            .bind(auction.id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(bids)
    }
}

#[async_trait]
impl UserRepo for PgStoreTx {
    async fn get_by_id(&mut self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(queries::GET_USER_BY_ID)
            .bind(user_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }
}

// endregion: --- Repositories
