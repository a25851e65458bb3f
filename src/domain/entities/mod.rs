//! # Domain Entities Module
//!
//! 비즈니스 도메인의 핵심 엔티티들을 정의합니다.
//!
//! ```text
//! entities/
//! ├── books/   ← Book 애그리거트 (Genre, Author, Review, Rating 내장)
//! └── users/   ← User 엔티티
//! ```
//!
//! ## 저장 방식의 차이
//!
//! - **User**: serde 파생으로 `users` 컬렉션 문서와 직접 매핑됩니다.
//! - **Book**: 문서 형태가 스키마리스 저장소에서 흔들릴 수 있으므로 serde 대신
//!   [`crate::repositories::books::mapper`]가 필드를 하나씩 검증하며 변환합니다.
//!   형태가 어긋난 문서는 `MalformedRecordError`로 거부됩니다.

pub mod books;
pub mod users;

pub use books::*;
pub use users::*;
