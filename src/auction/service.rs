// region:    --- Imports
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::composer::{build_aggregate, Enricher, WithBids, WithItem, WithMaxBidder};
use super::dto::{self, AuctionCard, AuctionFull, AuctionTableRow};
use super::model::AuctionAggregate;
use super::params::{AuctionCardParams, AuctionTableParams, Validator};
use crate::error::ServiceError;
use crate::repository::{Store, StoreTx};

// endregion: --- Imports

// region:    --- Relations

// 카테고리/상태 필터에 상품이 필요하다
const CARD_RELATIONS: &[&dyn Enricher] = &[&WithItem];

const TABLE_RELATIONS: &[&dyn Enricher] = &[&WithItem, &WithMaxBidder];

// 최고 입찰자는 입찰 목록에서 뷰 계층이 계산한다
const FULL_RELATIONS: &[&dyn Enricher] = &[&WithItem, &WithBids];

// endregion: --- Relations

// region:    --- Auction Service

pub type TxFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, ServiceError>> + Send + 'c>>;

/// 경매 조회 서비스
pub struct AuctionService<S> {
    store: S,
    query_timeout: Duration,
    image_base_url: String,
}

impl<S: Store> AuctionService<S> {
    pub fn new(store: S, query_timeout: Duration, image_base_url: impl Into<String>) -> Self {
        Self {
            store,
            query_timeout,
            image_base_url: image_base_url.into(),
        }
    }

    /// 트랜잭션 실행
    ///
    /// 성공하면 커밋, 실패하거나 시간이 초과되면 롤백하고 원래 오류를 돌려준다.
    /// 시작, 조회, 커밋이 모두 하나의 기한 안에 끝나야 한다.
    /// 시간 초과 시 진행 중인 future 는 drop 된다.
    pub async fn with_tx<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        R: Send,
        F: for<'c> FnOnce(&'c mut dyn StoreTx) -> TxFuture<'c, R> + Send,
    {
        let deadline = Instant::now() + self.query_timeout;
        let mut tx = match timeout_at(deadline, self.store.begin()).await {
            Ok(begun) => begun?,
            Err(_) => return Err(ServiceError::Timeout(self.query_timeout)),
        };
        let result = match timeout_at(deadline, f(tx.as_mut())).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.query_timeout)),
        };
        match result {
            // 커밋 도중 기한이 지나면 drop 된 트랜잭션은 커밋되지 않는다
            Ok(r) => match timeout_at(deadline, tx.commit()).await {
                Ok(committed) => {
                    committed?;
                    Ok(r)
                }
                Err(_) => Err(ServiceError::Timeout(self.query_timeout)),
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        "{:<12} --> 롤백 실패: {:?} (원래 오류: {})",
                        "Service", rollback_err, e
                    );
                }
                Err(e)
            }
        }
    }

    /// 경매 목록 조회 (가격 필터 후 카테고리/상태 필터)
    ///
    /// 카테고리/상태 필터는 조회된 페이지에 메모리에서 적용되므로
    /// 결과 개수가 요청한 길이보다 적을 수 있다.
    pub async fn list_auctions(
        &self,
        params: &AuctionCardParams,
    ) -> Result<Vec<AuctionAggregate>, ServiceError> {
        params.check()?;
        info!("{:<12} --> 경매 목록 조회 params: {:?}", "Service", params);
        let params = params.clone();
        self.with_tx(move |tx| {
            Box::pin(async move { get_auctions(tx, &params, CARD_RELATIONS).await })
        })
        .await
    }

    /// 경매 카드 조회
    pub async fn get_auction_cards(
        &self,
        params: &AuctionCardParams,
    ) -> Result<Vec<AuctionCard>, ServiceError> {
        self.list_auctions(params)
            .await?
            .iter()
            .map(|aggregate| dto::map_auction_card(aggregate, &self.image_base_url))
            .collect()
    }

    /// 사용자 경매 조회
    pub async fn list_user_auctions(
        &self,
        params: &AuctionTableParams,
    ) -> Result<Vec<AuctionAggregate>, ServiceError> {
        params.check()?;
        info!(
            "{:<12} --> 사용자 경매 조회 user: {}",
            "Service", params.user_id
        );
        let params = params.clone();
        self.with_tx(move |tx| {
            Box::pin(async move { get_user_auctions(tx, &params, TABLE_RELATIONS).await })
        })
        .await
    }

    /// 사용자 경매 테이블 조회
    pub async fn get_auction_table(
        &self,
        params: &AuctionTableParams,
    ) -> Result<Vec<AuctionTableRow>, ServiceError> {
        self.list_user_auctions(params)
            .await?
            .iter()
            .map(dto::map_auction_table)
            .collect()
    }

    /// 경매 상세 집계 조회
    pub async fn get_auction_by_id(&self, id: Uuid) -> Result<AuctionAggregate, ServiceError> {
        info!("{:<12} --> 경매 상세 조회 id: {}", "Service", id);
        self.with_tx(move |tx| {
            Box::pin(async move {
                let auction = tx
                    .auctions()
                    .get_by_id(id)
                    .await?
                    .ok_or(ServiceError::NotFound {
                        entity: "auction",
                        id,
                    })?;
                build_aggregate(auction, tx, FULL_RELATIONS).await
            })
        })
        .await
    }

    /// 경매 상세 조회
    pub async fn get_full_auction_by_id(&self, id: Uuid) -> Result<AuctionFull, ServiceError> {
        let aggregate = self.get_auction_by_id(id).await?;
        dto::map_auction_full(&aggregate, &self.image_base_url)
    }
}

// endregion: --- Auction Service

// region:    --- Queries

/// 가격 필터 여부에 따라 조회 방식을 고르고, 조립 후 카테고리/상태로 거른다
pub async fn get_auctions(
    tx: &mut dyn StoreTx,
    params: &AuctionCardParams,
    relations: &[&dyn Enricher],
) -> Result<Vec<AuctionAggregate>, ServiceError> {
    let records = if params.has_price_filter() {
        tx.auctions()
            .get_all_filtered(params.offset, params.len, params.min_price, params.max_price)
            .await?
    } else {
        tx.auctions().get_all(params.offset, params.len).await?
    };

    let fetched = records.len();
    let mut auctions = Vec::with_capacity(fetched);
    for record in records {
        let aggregate = build_aggregate(record, tx, relations).await?;
        if aggregate.item_has(&params.condition, &params.category) {
            auctions.push(aggregate);
        }
    }
    debug!(
        "{:<12} --> 조회 {}건 중 {}건 필터 통과",
        "Service",
        fetched,
        auctions.len()
    );
    Ok(auctions)
}

/// 사용자 소유 경매 조회
pub async fn get_user_auctions(
    tx: &mut dyn StoreTx,
    params: &AuctionTableParams,
    relations: &[&dyn Enricher],
) -> Result<Vec<AuctionAggregate>, ServiceError> {
    let records = tx
        .auctions()
        .get_all_by_user_id(params.user_id, params.limit, params.offset)
        .await?;

    let mut auctions = Vec::with_capacity(records.len());
    for record in records {
        auctions.push(build_aggregate(record, tx, relations).await?);
    }
    Ok(auctions)
}

// endregion: --- Queries
