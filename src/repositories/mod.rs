//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 저장소 트레이트(`BookStore`, `UserStore`) 뒤에 숨은
//! MongoDB 또는 인메모리 구현을 `Arc<dyn ...>`로 받아 동작합니다.
//! 어떤 구현을 쓸지는 `main`에서 `STORAGE_BACKEND` 설정에 따라 결정됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::books::{BookRepository, InMemoryBookStore};
//!
//! let books = BookRepository::new(Arc::new(InMemoryBookStore::new()));
//! let dune = books.search("title", "dune").await?;
//! ```

pub mod books;
pub mod users;
