//! 인증 서비스 모듈
//!
//! 로그인한 사용자에게 HS256 JWT 세션 토큰을 발급하고 검증합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::from_config();
//! let token = token_service.issue(&user)?;
//! let session = token_service.session_from_token(&token)?;
//! ```

pub mod token_service;

pub use token_service::*;
