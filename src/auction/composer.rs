//! 경매 집계 조립
//!
//! 기본 경매 레코드에서 시작해서 호출자가 고른 enrichment 단계를 순서대로 적용한다.
//! 단계들은 서로 다른 필드를 쓰지만 순서 보장을 위해 항상 순차 실행한다.
//!
//! 오류 정책:
//! - 상품, 입찰: 조회 실패와 행 없음 모두 hard failure
//! - 최고 입찰자: 행 없음은 빈 사용자로 대체 (soft), 전송 실패만 전파

// region:    --- Imports
use async_trait::async_trait;
use tracing::debug;

use super::model::{AuctionAggregate, AuctionRecord, UserRecord};
use crate::error::ServiceError;
use crate::repository::StoreTx;

// endregion: --- Imports

// region:    --- Enricher

/// 집계에 관계 하나를 붙이는 단계
#[async_trait]
pub trait Enricher: Send + Sync {
    fn relation(&self) -> &'static str;

    async fn enrich(
        &self,
        tx: &mut dyn StoreTx,
        aggregate: AuctionAggregate,
    ) -> Result<AuctionAggregate, ServiceError>;
}

/// 상품 붙이기
pub struct WithItem;

/// 입찰 목록 붙이기
pub struct WithBids;

/// 최고 입찰자 붙이기
pub struct WithMaxBidder;

#[async_trait]
impl Enricher for WithItem {
    fn relation(&self) -> &'static str {
        "item"
    }

    async fn enrich(
        &self,
        tx: &mut dyn StoreTx,
        mut aggregate: AuctionAggregate,
    ) -> Result<AuctionAggregate, ServiceError> {
        let item_id = aggregate.auction.item_id;
        let item = tx
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound {
                entity: "item",
                id: item_id,
            })?;
        aggregate.item = Some(item);
        Ok(aggregate)
    }
}

#[async_trait]
impl Enricher for WithBids {
    fn relation(&self) -> &'static str {
        "bids"
    }

    async fn enrich(
        &self,
        tx: &mut dyn StoreTx,
        mut aggregate: AuctionAggregate,
    ) -> Result<AuctionAggregate, ServiceError> {
        let bids = tx.bids().get_all_for(&aggregate.auction).await?;
        aggregate.bids = Some(bids);
        Ok(aggregate)
    }
}

#[async_trait]
impl Enricher for WithMaxBidder {
    fn relation(&self) -> &'static str {
        "max_bidder"
    }

    async fn enrich(
        &self,
        tx: &mut dyn StoreTx,
        mut aggregate: AuctionAggregate,
    ) -> Result<AuctionAggregate, ServiceError> {
        let bidder = match aggregate.auction.max_bidder_id {
            // 입찰이 아직 없는 경매
            None => None,
            Some(user_id) => tx.users().get_by_id(user_id).await?,
        };
        if bidder.is_none() {
            debug!(
                "{:<12} --> 최고 입찰자 없음, 빈 사용자로 대체 auction: {}",
                "Composer", aggregate.auction.id
            );
        }
        aggregate.max_bidder = Some(bidder.unwrap_or_else(empty_bidder));
        Ok(aggregate)
    }
}

// endregion: --- Enricher

// region:    --- Build

/// 기본 레코드에 enrichment 단계를 순서대로 적용
///
/// 하나라도 실패하면 부분 집계 없이 즉시 오류를 돌려준다.
pub async fn build_aggregate(
    auction: AuctionRecord,
    tx: &mut dyn StoreTx,
    relations: &[&dyn Enricher],
) -> Result<AuctionAggregate, ServiceError> {
    let mut aggregate = AuctionAggregate::new(auction);
    for relation in relations {
        debug!(
            "{:<12} --> {} 붙이기 auction: {}",
            "Composer",
            relation.relation(),
            aggregate.auction.id
        );
        aggregate = relation.enrich(tx, aggregate).await?;
    }
    Ok(aggregate)
}

/// 빈 최고 입찰자 sentinel
fn empty_bidder() -> UserRecord {
    UserRecord::default()
}

// endregion: --- Build
