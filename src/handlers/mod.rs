//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO를 검증한 뒤 `web::Data`로 주입된 서비스를 호출하고,
//! 결과를 응답 DTO로 변환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   SessionMiddleware - Bearer 토큰 → SessionContext
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - CatalogService, UserService       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - BookRepository, UserRepository ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드와 `{"error": "..."}` 본문을 만듭니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 회원가입, 로그인, 현재 세션
//! - **`books`**: 도서 카탈로그

pub mod auth;
pub mod books;
