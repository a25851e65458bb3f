//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 카탈로그의 비즈니스 객체와 API 계약을 담당합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - Book 애그리거트(Genre, Author, Review, Rating 내장), User
//! ├── DTOs      - 데이터 전송 객체 (Request/Response)
//! └── Models    - 요청 단위 세션, 토큰 클레임
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`] - 핵심 도메인 엔티티
//!
//! 도서는 저자, 리뷰, 평점을 내장한 하나의 애그리거트로 저장/조회됩니다.
//! 리뷰와 평점은 도서당 사용자별 최대 1개이며, 평점은 1-5 범위입니다.
//!
//! ### [`dto`] - 데이터 전송 객체
//!
//! API 경계에서 주고받는 JSON 구조입니다. 요청 DTO는 `validator`로 검증하고,
//! 응답 DTO는 엔티티에서 `From`으로 변환합니다.
//!
//! ### [`models`] - 세션/토큰 모델
//!
//! 전역 세션 대신 요청마다 만들어지는 [`SessionContext`](models::auth::SessionContext)와
//! JWT 클레임을 정의합니다.

pub mod entities;
pub mod dto;
pub mod models;
