//! 테스트용 메모리 저장소 (호출 기록, 커밋/롤백 횟수, 실패/지연 주입)
#![allow(dead_code)]

use async_trait::async_trait;
use auction_listing_service::auction::model::{
    AuctionRecord, BidRecord, Category, Condition, ItemRecord, UserRecord,
};
use auction_listing_service::repository::{
    AuctionRepo, BidRepo, ItemRepo, Store, StoreError, StoreTx, UserRepo,
};
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

// region:    --- Call Log

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll { offset: i64, len: i64 },
    GetAllFiltered { offset: i64, len: i64, min: Decimal, max: Decimal },
    GetAllByUserId { user_id: Uuid, limit: i64, offset: i64 },
    AuctionById(Uuid),
    ItemById(Uuid),
    BidsFor(Uuid),
    UserById(Uuid),
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub calls: Vec<Call>,
}

// endregion: --- Call Log

// region:    --- Fixture

/// 저장소 내용
#[derive(Debug, Default, Clone)]
pub struct Fixture {
    pub auctions: Vec<AuctionRecord>,
    pub items: HashMap<Uuid, ItemRecord>,
    pub bids: HashMap<Uuid, Vec<BidRecord>>,
    pub users: HashMap<Uuid, UserRecord>,
    // 전송 실패를 돌려줄 id
    pub broken_items: HashSet<Uuid>,
    pub broken_users: HashSet<Uuid>,
    // 입찰 조회가 실패할 경매 id
    pub broken_bids: HashSet<Uuid>,
    pub broken_listing: bool,
    pub latency: Option<Duration>,
    pub begin_latency: Option<Duration>,
    pub commit_latency: Option<Duration>,
}

impl Fixture {
    pub fn add_listing(&mut self, category: Category, condition: Condition) -> AuctionRecord {
        self.add_listing_priced(category, condition, Decimal::new(1000, 2))
    }

    pub fn add_listing_priced(
        &mut self,
        category: Category,
        condition: Condition,
        current_bid: Decimal,
    ) -> AuctionRecord {
        let item = item(category, condition);
        let auction = auction(item.id, current_bid);
        self.items.insert(item.id, item);
        self.auctions.push(auction.clone());
        auction
    }

    pub fn add_user(&mut self, username: &str) -> UserRecord {
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn add_bid(&mut self, auction_id: Uuid, bidder_id: Uuid, amount: Decimal) -> BidRecord {
        let bids = self.bids.entry(auction_id).or_default();
        let bid = BidRecord {
            id: Uuid::new_v4(),
            auction_id,
            bidder_id,
            amount,
            placed_at: base_time() + ChronoDuration::minutes(bids.len() as i64),
        };
        bids.push(bid.clone());
        bid
    }
}

pub fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn item(category: Category, condition: Condition) -> ItemRecord {
    ItemRecord {
        id: Uuid::new_v4(),
        name: format!("{} lot", category),
        description: "test lot".to_string(),
        category,
        condition,
        images: vec![format!("{}.png", Uuid::new_v4())],
    }
}

pub fn auction(item_id: Uuid, current_bid: Decimal) -> AuctionRecord {
    AuctionRecord {
        id: Uuid::new_v4(),
        item_id,
        seller_id: Uuid::new_v4(),
        starting_price: Decimal::new(500, 2),
        current_bid,
        bid_count: 0,
        start_time: base_time(),
        end_time: base_time() + ChronoDuration::days(7),
        max_bidder_id: None,
    }
}

// endregion: --- Fixture

// region:    --- Memory Store

#[derive(Clone)]
pub struct MemoryStore {
    pub fixture: Arc<Fixture>,
    pub log: Arc<Mutex<CallLog>>,
}

impl MemoryStore {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            log: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn begins(&self) -> usize {
        self.log.lock().unwrap().begins
    }

    pub fn commits(&self) -> usize {
        self.log.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.log.lock().unwrap().rollbacks
    }

    /// 트랜잭션 핸들 직접 생성 (조립기 단위 테스트용)
    pub fn tx(&self) -> MemoryTx {
        MemoryTx {
            fixture: Arc::clone(&self.fixture),
            log: Arc::clone(&self.log),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        self.log.lock().unwrap().begins += 1;
        if let Some(latency) = self.fixture.begin_latency {
            tokio::time::sleep(latency).await;
        }
        Ok(Box::new(self.tx()))
    }
}

pub struct MemoryTx {
    fixture: Arc<Fixture>,
    log: Arc<Mutex<CallLog>>,
}

impl MemoryTx {
    async fn record(&self, call: Call) {
        self.log.lock().unwrap().calls.push(call);
        if let Some(latency) = self.fixture.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn transport_failure() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl StoreTx for MemoryTx {
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
        // 커밋은 끝까지 진행된 경우에만 센다
        if let Some(latency) = self.fixture.commit_latency {
            tokio::time::sleep(latency).await;
        }
        self.log.lock().unwrap().commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.log.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

fn page(auctions: impl Iterator<Item = AuctionRecord>, offset: i64, len: i64) -> Vec<AuctionRecord> {
    auctions.skip(offset as usize).take(len as usize).collect()
}

#[async_trait]
impl AuctionRepo for MemoryTx {
    async fn get_all(&mut self, offset: i64, len: i64) -> Result<Vec<AuctionRecord>, StoreError> {
        self.record(Call::GetAll { offset, len }).await;
        if self.fixture.broken_listing {
            return Err(transport_failure());
        }
        Ok(page(self.fixture.auctions.iter().cloned(), offset, len))
    }

    async fn get_all_filtered(
        &mut self,
        offset: i64,
        len: i64,
        min_price: Decimal,
        max_price: Decimal,
    ) -> Result<Vec<AuctionRecord>, StoreError> {
        self.record(Call::GetAllFiltered {
            offset,
            len,
            min: min_price,
            max: max_price,
        })
        .await;
        if self.fixture.broken_listing {
            return Err(transport_failure());
        }
        let matching = self
            .fixture
            .auctions
            .iter()
            .filter(|a| a.current_bid >= min_price && a.current_bid <= max_price)
            .cloned();
        Ok(page(matching, offset, len))
    }

    async fn get_all_by_user_id(
        &mut self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuctionRecord>, StoreError> {
        self.record(Call::GetAllByUserId {
            user_id,
            limit,
            offset,
        })
        .await;
        let owned = self
            .fixture
            .auctions
            .iter()
            .filter(|a| a.seller_id == user_id)
            .cloned();
        Ok(page(owned, offset, limit))
    }

    async fn get_by_id(&mut self, id: Uuid) -> Result<Option<AuctionRecord>, StoreError> {
        self.record(Call::AuctionById(id)).await;
        Ok(self.fixture.auctions.iter().find(|a| a.id == id).cloned())
    }
}

#[async_trait]
impl ItemRepo for MemoryTx {
    async fn get_by_id(&mut self, item_id: Uuid) -> Result<Option<ItemRecord>, StoreError> {
        self.record(Call::ItemById(item_id)).await;
        if self.fixture.broken_items.contains(&item_id) {
            return Err(transport_failure());
        }
        Ok(self.fixture.items.get(&item_id).cloned())
    }
}

#[async_trait]
impl BidRepo for MemoryTx {
    async fn get_all_for(&mut self, auction: &AuctionRecord) -> Result<Vec<BidRecord>, StoreError> {
        self.record(Call::BidsFor(auction.id)).await;
        if self.fixture.broken_bids.contains(&auction.id) {
            return Err(transport_failure());
        }
        Ok(self.fixture.bids.get(&auction.id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl UserRepo for MemoryTx {
    async fn get_by_id(&mut self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        self.record(Call::UserById(user_id)).await;
        if self.fixture.broken_users.contains(&user_id) {
            return Err(transport_failure());
        }
        Ok(self.fixture.users.get(&user_id).cloned())
    }
}

// endregion: --- Memory Store
