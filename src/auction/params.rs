/// 조회 파라미터와 검증
/// 1. 카드 목록 파라미터 (가격/카테고리/상태 필터)
/// 2. 테이블(이력) 파라미터 (소유자 기준)
// region:    --- Imports
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use super::model::{Category, Condition};
use crate::error::ServiceError;

// endregion: --- Imports

// region:    --- Problems

/// 필드 이름 -> 위반 메시지. 비어 있으면 유효하다.
pub type Problems = BTreeMap<String, String>;

pub trait Validator {
    /// 모든 위반 사항을 누적해서 돌려준다 (첫 위반에서 멈추지 않음)
    fn validate(&self) -> Problems;

    fn check(&self) -> Result<(), ServiceError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(problems))
        }
    }
}

// endregion: --- Problems

// region:    --- Card Params

/// 카드 목록 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionCardParams {
    pub category: String,
    pub condition: String,
    pub offset: i64,
    pub len: i64,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

impl AuctionCardParams {
    /// 최대 가격이 0 이 아니면 가격 필터가 적용된다
    pub fn has_price_filter(&self) -> bool {
        !self.max_price.is_zero()
    }
}

impl Validator for AuctionCardParams {
    fn validate(&self) -> Problems {
        let mut problems = Problems::new();

        if self.len <= 0 {
            problems.insert("len".into(), "must be greater than 0".into());
        }
        if self.offset < 0 {
            problems.insert("offset".into(), "cannot be negative".into());
        }
        if self.has_price_filter() && self.max_price < self.min_price {
            problems.insert(
                "max_price".into(),
                "max price cannot be less than min price".into(),
            );
        }
        // 빈 문자열도 enum 으로 검사한다 (와일드카드 없음)
        if !Category::is_category(&self.category) {
            problems.insert(
                "category".into(),
                format!("{} does not exist", self.category),
            );
        }
        if !Condition::is_condition(&self.condition) {
            problems.insert(
                "condition".into(),
                format!("{} does not exist", self.condition),
            );
        }

        problems
    }
}

// endregion: --- Card Params

// region:    --- Table Params

/// 사용자 경매 이력 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionTableParams {
    pub user_id: Uuid,
    pub limit: i64,
    pub offset: i64,
}

impl Validator for AuctionTableParams {
    fn validate(&self) -> Problems {
        let mut problems = Problems::new();

        if self.limit <= 0 {
            problems.insert("limit".into(), "must be greater than 0".into());
        }
        if self.offset < 0 {
            problems.insert("offset".into(), "cannot be negative".into());
        }

        problems
    }
}

// endregion: --- Table Params

// region:    --- Raw Queries

/// 쿼리 스트링 원본 (카드 목록)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionCardQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "condition")]
    pub lotcondition: Option<String>,
}

impl AuctionCardQuery {
    /// 파싱 오류와 검증 오류를 하나의 Problems 로 합쳐서 돌려준다
    pub fn into_params(self) -> Result<AuctionCardParams, Problems> {
        let mut problems = Problems::new();

        let offset = parse_field(&mut problems, "offset", self.offset, Some(0), "must be an integer");
        let len = parse_field(&mut problems, "len", self.limit, None, "must be an integer");
        let min_price = parse_field(
            &mut problems,
            "min_price",
            self.min_price,
            Some(Decimal::ZERO),
            "must be a decimal number",
        );
        let max_price = parse_field(
            &mut problems,
            "max_price",
            self.max_price,
            Some(Decimal::ZERO),
            "must be a decimal number",
        );

        let params = AuctionCardParams {
            category: self.category.unwrap_or_default(),
            condition: self.lotcondition.unwrap_or_default(),
            offset: offset.unwrap_or(0),
            len: len.unwrap_or(0),
            min_price: min_price.unwrap_or(Decimal::ZERO),
            max_price: max_price.unwrap_or(Decimal::ZERO),
        };

        // 파싱에 실패한 필드는 파싱 메시지를 유지한다
        for (field, message) in params.validate() {
            problems.entry(field).or_insert(message);
        }

        if problems.is_empty() {
            Ok(params)
        } else {
            Err(problems)
        }
    }
}

/// 쿼리 스트링 원본 (사용자 경매 이력)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionTableQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl AuctionTableQuery {
    pub fn into_params(self, user_id: Uuid) -> Result<AuctionTableParams, Problems> {
        let mut problems = Problems::new();

        let offset = parse_field(&mut problems, "offset", self.offset, Some(0), "must be an integer");
        let limit = parse_field(&mut problems, "limit", self.limit, None, "must be an integer");

        let params = AuctionTableParams {
            user_id,
            limit: limit.unwrap_or(0),
            offset: offset.unwrap_or(0),
        };

        for (field, message) in params.validate() {
            problems.entry(field).or_insert(message);
        }

        if problems.is_empty() {
            Ok(params)
        } else {
            Err(problems)
        }
    }
}

/// 단일 필드 파싱. 값이 없으면 기본값, 기본값도 없으면 문제로 기록한다.
fn parse_field<T: FromStr>(
    problems: &mut Problems,
    field: &str,
    raw: Option<String>,
    default: Option<T>,
    message: &str,
) -> Option<T> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => {
            if default.is_none() {
                problems.insert(field.into(), "is required".into());
            }
            default
        }
        Some(value) => match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                problems.insert(field.into(), format!("{} ({})", message, value));
                None
            }
        },
    }
}

// endregion: --- Raw Queries
