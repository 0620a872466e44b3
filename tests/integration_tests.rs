//! 실행 중인 서버(localhost:3000)와 DATABASE_URL 이 필요한 테스트
//! `cargo test -- --ignored` 로 실행한다.
use auction_listing_service::config::AppConfig;
use auction_listing_service::database::DatabaseManager;
use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// 데이터베이스 매니저 설정
async fn setup() -> Arc<DatabaseManager> {
    let config = AppConfig::from_env().expect("DATABASE_URL must be set");
    let db_manager = DatabaseManager::connect(&config)
        .await
        .expect("데이터베이스 연결 실패");
    db_manager
        .initialize_database()
        .await
        .expect("스키마 초기화 실패");
    Arc::new(db_manager)
}

/// 테스트용 사용자 생성
async fn create_test_user(db_manager: &DatabaseManager, username: &str) -> Uuid {
    let mut tx = db_manager.pool().begin().await.unwrap();
    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id",
    )
    .bind(username)
    .bind(format!("{}-{}@example.com", username, Uuid::new_v4()))
    .fetch_one(&mut *tx)
    .await
    .unwrap();
    tx.commit().await.unwrap();
    user_id
}

/// 테스트용 경매 생성 (상품 포함)
async fn create_test_auction(
    db_manager: &DatabaseManager,
    seller_id: Uuid,
    category: &str,
    condition: &str,
    max_bidder_id: Option<Uuid>,
) -> Uuid {
    let mut tx = db_manager.pool().begin().await.unwrap();
    let item_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO items (name, description, category, lot_condition, images)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("통합 테스트 상품")
    .bind("통합 테스트를 위한 상품입니다.")
    .bind(category)
    .bind(condition)
    .bind(vec!["test.png".to_string()])
    .fetch_one(&mut *tx)
    .await
    .unwrap();

    let auction_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO auctions (item_id, seller_id, starting_price, current_bid, bid_count, start_time, end_time, max_bidder_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id",
    )
    .bind(item_id)
    .bind(seller_id)
    .bind(Decimal::new(10000, 2))
    .bind(Decimal::new(10000, 2))
    .bind(0i64)
    .bind(Utc::now())
    .bind(Utc::now() + Duration::hours(2))
    .bind(max_bidder_id)
    .fetch_one(&mut *tx)
    .await
    .unwrap();
    tx.commit().await.unwrap();
    auction_id
}

/// 사용자 경매 이력 조회 (최고 입찰자 없는 경매 포함)
#[tokio::test]
#[ignore = "requires a running server and DATABASE_URL"]
async fn test_user_auction_history() {
    let db_manager = setup().await;
    let client = Client::new();

    let seller = create_test_user(&db_manager, "seller").await;
    let bidder = create_test_user(&db_manager, "bidder").await;
    create_test_auction(&db_manager, seller, "art", "new", Some(bidder)).await;
    create_test_auction(&db_manager, seller, "books", "used", None).await;

    let response = client
        .get(format!("http://localhost:3000/users/{}/auctions?limit=10", seller))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let rows: Vec<Value> = response.json().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows.iter().filter(|row| row["max_bidder"].is_null()).count(),
        1
    );
}

/// 경매 상세 조회
#[tokio::test]
#[ignore = "requires a running server and DATABASE_URL"]
async fn test_full_auction() {
    let db_manager = setup().await;
    let client = Client::new();

    let seller = create_test_user(&db_manager, "seller").await;
    let auction_id = create_test_auction(&db_manager, seller, "home", "like_new", None).await;

    let response = client
        .get(format!("http://localhost:3000/auctions/{}", auction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["condition"], "like_new");
    assert!(body["bids"].as_array().unwrap().is_empty());
}

/// 잘못된 파라미터는 400
#[tokio::test]
#[ignore = "requires a running server"]
async fn test_invalid_listing_query() {
    let client = Client::new();

    let response = client
        .get("http://localhost:3000/auctions?offset=0&limit=0&category=&lotcondition=new")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]["len"].is_string());
    assert!(body["error"]["category"].is_string());
}
