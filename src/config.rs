// region:    --- Imports
use std::time::Duration;

use crate::error::ConfigError;

// endregion: --- Imports

// region:    --- App Config
/// 환경 변수 기반 설정
///
/// | Env Var                    | Default                 |
/// |----------------------------|-------------------------|
/// | `DATABASE_URL`             | (필수)                  |
/// | `HOST`                     | `0.0.0.0`               |
/// | `PORT`                     | `3000`                  |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                     |
/// | `QUERY_TIMEOUT_SECS`       | `10`                    |
/// | `IMAGE_BASE_URL`           | `http://{HOST}:{PORT}`  |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub query_timeout_secs: u64,
    pub image_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로부터 설정 생성
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        let query_timeout_secs = parse_or(&lookup, "QUERY_TIMEOUT_SECS", 10u64)?;
        let image_base_url = lookup("IMAGE_BASE_URL")
            .unwrap_or_else(|| format!("http://{}:{}", host, port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            query_timeout_secs,
            image_base_url,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

// endregion: --- App Config
