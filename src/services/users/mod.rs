//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인(SHA-256 다이제스트 비교 후 세션 토큰 발급), 사용자 조회를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(user_repo, token_service);
//! let login = user_service.login(request).await?;
//! ```

pub mod user_service;

pub use user_service::{hash_password, UserService};
