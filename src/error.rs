// region:    --- Imports
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::auction::params::Problems;
use crate::repository::StoreError;

// endregion: --- Imports

// region:    --- Service Error
/// 서비스 계층 오류
#[derive(Debug, Error)]
pub enum ServiceError {
    // 클라이언트 입력 오류 (400), 재시도 및 서버 오류 로깅 대상 아님
    #[error("invalid request parameters: {0:?}")]
    Validation(Problems),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    // 요청하지 않은 관계를 뷰가 요구한 경우
    #[error("aggregate is missing the {0} relation")]
    MissingRelation(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transaction timed out after {0:?}")]
    Timeout(Duration),
}

// endregion: --- Service Error

// region:    --- Config Error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

// endregion: --- Config Error
