// region:    --- Imports
use auction_listing_service::auction::service::AuctionService;
use auction_listing_service::config::AppConfig;
use auction_listing_service::database::DatabaseManager;
use auction_listing_service::handlers;
use auction_listing_service::repository::PgStore;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = AppConfig::from_env().map_err(|e| {
        error!("{:<12} --> 설정 로드 실패: {}", "Main", e);
        e
    })?;

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::connect(&config).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    let service = Arc::new(AuctionService::new(
        PgStore::new(Arc::clone(&db_manager)),
        config.query_timeout(),
        config.image_base_url.clone(),
    ));

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = handlers::router(service)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
