//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 미들웨어 (SessionMiddleware)
//! - Bearer 토큰 추출 및 검증
//! - 요청별 `SessionContext`를 request extension에 저장
//! - 토큰이 없으면 익명 세션, 잘못된 토큰이면 401
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{App, HttpServer};
//! use crate::middlewares::SessionMiddleware;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .wrap(SessionMiddleware::new(token_service.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

mod session_inner;
pub mod session_middleware;

pub use session_middleware::SessionMiddleware;
