use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::AppConfig;

/// Postgres 연결 풀 관리
///
/// 트랜잭션 범위는 `repository::PgStore` 가 이 풀에서 연다.
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.query_timeout())
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// 데이터베이스 스키마 초기화 (멱등)
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        let create_schema_sql = include_str!("../sql/01-create-schema.sql");
        for statement in create_schema_sql.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement).execute(&self.pool).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
