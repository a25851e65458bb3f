//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인, 사용자 조회를 담당합니다.
//! 카탈로그에서 사용자는 리뷰/평점 작성자를 식별하는 용도이므로
//! 계정 관리 기능은 이 세 가지로 한정됩니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 UserService                  │
//! │  register ─► SHA-256 hex ─► UserRepository   │
//! │  login    ─► digest 비교 ─► TokenService     │
//! │  get_user ─► UserRepository                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## 비밀번호 저장
//!
//! 비밀번호는 SHA-256 다이제스트의 소문자 16진수 문자열로 저장되며,
//! 로그인 시 입력값의 다이제스트와 저장된 값을 비교합니다.

use std::sync::Arc;

use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::domain::entities::users::User;
use crate::repositories::users::UserRepository;
use crate::services::auth::TokenService;

/// 비밀번호의 SHA-256 다이제스트를 소문자 16진수로 반환합니다.
pub fn hash_password(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// 사용자 관리 서비스
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let service = UserService::new(user_repo, token_service);
///
/// let created = service.register(RegisterRequest {
///     username: "alice".to_string(),
///     password: "secret".to_string(),
/// }).await?;
///
/// let login = service.login(LoginRequest {
///     username: "alice".to_string(),
///     password: "secret".to_string(),
/// }).await?;
/// println!("Bearer {}", login.access_token);
/// ```
#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(users: Arc<UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// 새 사용자 등록
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidArgument` - 빈 사용자명 또는 비밀번호
    /// * `AppError::ConflictError` - 이미 사용 중인 사용자명
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AppError::InvalidArgument("사용자명과 비밀번호는 필수입니다".to_string()));
        }

        let user = User::new(username.to_string(), hash_password(&request.password));
        let created = self.users.create(user).await?;

        info!("회원가입 완료: {}", created.username);
        Ok(UserResponse::from(created))
    }

    /// 사용자명/비밀번호로 로그인하고 세션 토큰을 발급합니다.
    ///
    /// 사용자가 없는 경우와 비밀번호가 틀린 경우 같은 메시지를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 사용자명 또는 비밀번호
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let invalid = || AppError::AuthenticationError("잘못된 사용자명 또는 비밀번호입니다".to_string());

        let user = self
            .users
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if user.password_hash != hash_password(&request.password) {
            warn!("로그인 실패: {}", user.username);
            return Err(invalid());
        }

        let token = self.tokens.issue(&user)?;
        info!("로그인 성공: {}", user.username);

        Ok(LoginResponse::new(user, token, self.tokens.expires_in_seconds()))
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidIdentifier` - 잘못된 ObjectId 형식
    /// * `AppError::NotFound` - 사용자가 없음
    pub async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))
    }
}
