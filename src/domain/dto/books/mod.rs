//! # Book Data Transfer Objects Module
//!
//! 도서 API의 요청/응답 데이터 구조를 정의합니다.
//!
//! ## JSON 예제
//!
//! ```json
//! POST /api/v1/books
//! {
//!   "title": "Dune",
//!   "isbn": "9780441013593",
//!   "genre": { "id": 1, "name": "Science Fiction" },
//!   "authors": [ { "name": "Frank Herbert", "birthdate": "1920-10-08" } ]
//! }
//!
//! 201 Created
//! {
//!   "id": "665f1c2e9b1e8a3d4c2b1a00",
//!   "title": "Dune",
//!   "isbn": "9780441013593",
//!   "genre": { "id": 1, "name": "Science Fiction" },
//!   "authors": [ { "name": "Frank Herbert", "birthdate": "1920-10-08" } ],
//!   "reviews": [],
//!   "ratings": [],
//!   "average_rating": 0.0,
//!   "owner_user_id": "507f1f77bcf86cd799439011"
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
