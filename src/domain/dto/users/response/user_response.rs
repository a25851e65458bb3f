use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;
use crate::domain::models::auth::SessionContext;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
        }
    }
}

/// 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    /// 새 로그인 응답 생성
    pub fn new(user: User, access_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// 현재 세션 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl From<&SessionContext> for SessionResponse {
    fn from(session: &SessionContext) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            user_id: session.current_user_id().map(str::to_string),
            username: session.current_username().map(str::to_string),
        }
    }
}
