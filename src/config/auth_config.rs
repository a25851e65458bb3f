//! # Authentication Configuration Module
//!
//! 세션 토큰(JWT) 관련 설정을 관리하는 모듈입니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```

use std::env;

/// JWT 토큰 설정을 관리하는 구조체
///
/// 로그인 성공 시 발급하는 HS256 세션 토큰의 서명 키와 만료 시간을 제공합니다.
pub struct JwtConfig;

impl JwtConfig {
    pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

    /// JWT 서명에 사용할 비밀 키를 반환합니다.
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하고 경고 로그를 남깁니다.
    ///
    /// # 환경 변수
    ///
    /// ```bash
    /// export JWT_SECRET="$(openssl rand -base64 32)"
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "book-catalog-dev-secret".to_string()
            })
    }

    /// 세션 토큰 만료 시간(시간 단위). 기본값: 24
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .filter(|hours: &i64| *hours > 0)
            .unwrap_or(Self::DEFAULT_EXPIRATION_HOURS)
    }
}
