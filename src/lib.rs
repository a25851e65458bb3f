//! 도서 카탈로그 서비스 백엔드
//!
//! MongoDB에 도서를 저장하고 리뷰, 평점, 저자를 관리하는 REST API 서비스입니다.
//! 도서는 하나의 문서 안에 장르, 저자, 리뷰, 평점을 내장 배열로 보관하며,
//! 리뷰와 평점은 도서당 사용자별로 하나만 유지됩니다.
//!
//! # Features
//!
//! - **도서 카탈로그**: 등록, 조회, 삭제, 필드별 대소문자 무시 검색
//! - **내장 배열 업서트**: 사용자별 리뷰/평점, `(name, birthdate)`별 저자를 추가 또는 교체
//! - **사용자/세션**: 회원가입, 로그인, JWT 기반 요청별 세션
//! - **MongoDB**: 도서/사용자 데이터 영구 저장 (`STORAGE_BACKEND=memory`로 인메모리 실행 가능)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + SessionMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← CatalogService, UserService, TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 문서 매퍼, 업서트 엔진, BookStore/UserStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB / 메모리 │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use book_catalog_backend::repositories::books::{BookRepository, InMemoryBookStore};
//!
//! let repo = BookRepository::new(Arc::new(InMemoryBookStore::new()));
//! let dune = repo.search("title", "dune").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
