// region:    --- Imports
use crate::auction::params::{AuctionCardQuery, AuctionTableQuery, Problems};
use crate::auction::service::AuctionService;
use crate::error::ServiceError;
use crate::repository::Store;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Router

/// 조회 라우터 생성
pub fn router<S: Store + 'static>(service: Arc<AuctionService<S>>) -> Router {
    Router::new()
        .route("/auctions", get(handle_get_auctions::<S>))
        .route("/auctions/:id", get(handle_get_auction::<S>))
        .route("/users/:id/auctions", get(handle_get_user_auctions::<S>))
        .with_state(service)
}

// endregion: --- Router

// region:    --- Error Response

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(problems) => return validation_response(problems),
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::MissingRelation(_) | ServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("{:<12} --> 요청 처리 실패: {}", "Handler", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

fn validation_response(problems: &Problems) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": problems })),
    )
        .into_response()
}

// endregion: --- Error Response

// region:    --- Query Handlers

/// 경매 카드 목록 조회
pub async fn handle_get_auctions<S: Store + 'static>(
    State(service): State<Arc<AuctionService<S>>>,
    Query(query): Query<AuctionCardQuery>,
) -> Response {
    info!("{:<12} --> 경매 카드 목록 조회 {:?}", "HandlerQuery", query);
    let params = match query.into_params() {
        Ok(params) => params,
        Err(problems) => return validation_response(&problems),
    };
    match service.get_auction_cards(&params).await {
        Ok(cards) => Json(cards).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 경매 상세 조회
pub async fn handle_get_auction<S: Store + 'static>(
    State(service): State<Arc<AuctionService<S>>>,
    Path(auction_id): Path<Uuid>,
) -> Response {
    info!("{:<12} --> 경매 상세 조회 id: {}", "HandlerQuery", auction_id);
    match service.get_full_auction_by_id(auction_id).await {
        Ok(auction) => Json(auction).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 사용자 경매 이력 조회
pub async fn handle_get_user_auctions<S: Store + 'static>(
    State(service): State<Arc<AuctionService<S>>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<AuctionTableQuery>,
) -> Response {
    info!(
        "{:<12} --> 사용자 경매 이력 조회 user: {}",
        "HandlerQuery", user_id
    );
    let params = match query.into_params(user_id) {
        Ok(params) => params,
        Err(problems) => return validation_response(&problems),
    };
    match service.get_auction_table(&params).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Query Handlers
