//! 세션 토큰 클레임
//!
//! 로그인 성공 시 발급되는 HS256 JWT의 페이로드입니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `username`: 리뷰 작성자 표시에 쓰이는 사용자명
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}
