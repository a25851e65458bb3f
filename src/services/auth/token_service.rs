//! JWT 세션 토큰 서비스 구현
//!
//! 로그인 성공 시 HS256 서명 토큰을 발급하고, 요청마다 토큰을 검증하여
//! [`SessionContext`](crate::domain::models::auth::SessionContext)를 만들 수 있게 합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;
use crate::domain::models::auth::SessionContext;
use crate::domain::models::token::TokenClaims;

/// JWT 세션 토큰 서비스
///
/// HMAC-SHA256 서명을 사용하여 토큰을 생성하고 검증합니다.
/// 토큰에는 사용자 ID(`sub`)와 사용자명이 들어갑니다.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// [`JwtConfig`]의 비밀 키와 만료 시간으로 생성합니다.
    pub fn from_config() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_hours())
    }

    /// 토큰 유효 기간(초)
    pub fn expires_in_seconds(&self) -> i64 {
        self.expiration_hours * 3600
    }

    /// 사용자를 위한 세션 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 저장되지 않은 사용자
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue(&user)?;
    /// ```
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("사용자 ID가 없습니다".to_string())
            })?,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                },
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 토큰을 검증하고 로그인 세션으로 변환합니다.
    pub fn session_from_token(&self, token: &str) -> AppResult<SessionContext> {
        let claims = self.verify(token)?;
        Ok(SessionContext::for_user(claims.sub, claims.username))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식 또는 빈 토큰
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn saved_user() -> User {
        let mut user = User::new("alice".to_string(), "hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_and_verify_round_trip_carries_identity() {
        let service = TokenService::new("secret", 1);
        let user = saved_user();

        let token = service.issue(&user).unwrap();
        let session = service.session_from_token(&token).unwrap();

        assert_eq!(session.current_user_id(), user.id_string().as_deref());
        assert_eq!(session.current_username(), Some("alice"));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("secret-a", 1).issue(&saved_user()).unwrap();

        assert!(matches!(
            TokenService::new("secret-b", 1).verify(&token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = TokenService::new("secret", -2).issue(&saved_user()).unwrap();

        assert!(matches!(
            TokenService::new("secret", 1).verify(&token),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_unsaved_user_cannot_receive_token() {
        let user = User::new("bob".to_string(), "hash".to_string());
        assert!(matches!(
            TokenService::new("secret", 1).issue(&user),
            Err(AppError::InternalError(_))
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::new("secret", 1);
        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
