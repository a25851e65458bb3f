//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 `web::Data`로 핸들러에 공유됩니다.
//! 도메인별로 모듈화되어 도서 카탈로그, 사용자 관리, 세션 토큰을 담당합니다.
//!
//! # Features
//!
//! - 도서 등록/삭제/검색과 리뷰, 평점, 저자 업서트
//! - 회원가입과 로그인
//! - JWT 세션 토큰 발급 및 검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{books::CatalogService, users::UserService};
//!
//! let catalog = CatalogService::new(book_repo, user_repo.clone());
//! let users = UserService::new(user_repo, token_service);
//! ```

pub mod auth;
pub mod books;
pub mod users;
