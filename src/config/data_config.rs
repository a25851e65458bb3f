//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 데이터베이스, Rate Limiting 설정을 관리합니다.

use std::env;
use std::str::FromStr;

use log::warn;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_name(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 환경 이름(대소문자 무관)을 해석합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 환경 변수 값을 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            warn!("{} 파싱 실패: {}. 기본값 사용", key, e);
            default
        }),
        None => default,
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// # Returns
    ///
    /// 포트 번호. 기본값: 8080
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: 커스텀 포트 설정
    pub fn port() -> u16 {
        parse_or("PORT", env::var("PORT").ok(), 8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// # Returns
    ///
    /// 호스트 주소. 기본값: "127.0.0.1"
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: 커스텀 호스트 설정
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// HTTP 워커 스레드 수. 기본값: 4
    pub fn workers() -> usize {
        parse_or("SERVER_WORKERS", env::var("SERVER_WORKERS").ok(), 4)
    }
}

/// 도서/사용자 데이터를 보관할 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// MongoDB (`MONGODB_URI`, `DATABASE_NAME`)
    MongoDb,
    /// 프로세스 메모리 (재시작 시 데이터 소실)
    Memory,
}

impl StorageBackend {
    /// 저장소 이름을 해석합니다. 알 수 없는 값은 `MongoDb`입니다.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            "mongodb" | "mongo" => StorageBackend::MongoDb,
            other => {
                warn!("알 수 없는 STORAGE_BACKEND '{}', mongodb 사용", other);
                StorageBackend::MongoDb
            }
        }
    }
}

/// 데이터베이스 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub const DEFAULT_URI: &'static str = "mongodb://localhost:27017";
    pub const DEFAULT_DATABASE_NAME: &'static str = "bookdatabase";

    /// MongoDB 연결 URI. 기본값: `mongodb://localhost:27017`
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| Self::DEFAULT_URI.to_string())
    }

    /// 데이터베이스 이름. 기본값: `bookdatabase`
    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| Self::DEFAULT_DATABASE_NAME.to_string())
    }

    /// MongoDB 클라이언트에 표시할 애플리케이션 이름
    pub fn app_name() -> String {
        env::var("MONGODB_APP_NAME").unwrap_or_else(|_| "book_catalog".to_string())
    }

    /// `STORAGE_BACKEND` (`mongodb` | `memory`). 기본값: `mongodb`
    pub fn storage_backend() -> StorageBackend {
        env::var("STORAGE_BACKEND")
            .map(|name| StorageBackend::from_name(&name))
            .unwrap_or(StorageBackend::MongoDb)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 100,
            burst_size: 200,
        }
    }
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("RATE_LIMIT_PER_SECOND").ok(),
            env::var("RATE_LIMIT_BURST_SIZE").ok(),
        )
    }

    fn from_values(per_second: Option<String>, burst_size: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            per_second: parse_or("RATE_LIMIT_PER_SECOND", per_second, defaults.per_second),
            burst_size: parse_or("RATE_LIMIT_BURST_SIZE", burst_size, defaults.burst_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("DEV"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
        assert!(Environment::from_name("prod").is_production());
    }

    #[test]
    fn test_storage_backend_from_name() {
        assert_eq!(StorageBackend::from_name("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_name(" MongoDB "), StorageBackend::MongoDb);
        assert_eq!(StorageBackend::from_name("cassandra"), StorageBackend::MongoDb);
    }

    #[test]
    fn test_rate_limit_values_fall_back_to_defaults() {
        let parsed = RateLimitConfig::from_values(Some("20".to_string()), Some("40".to_string()));
        assert_eq!(parsed, RateLimitConfig { per_second: 20, burst_size: 40 });

        let fallback = RateLimitConfig::from_values(Some("many".to_string()), None);
        assert_eq!(fallback, RateLimitConfig::default());
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }

        if env::var("DATABASE_NAME").is_err() {
            assert_eq!(DatabaseConfig::database_name(), "bookdatabase");
        }
    }
}
