//! # Core Module
//!
//! 서비스 전역에서 공유하는 핵심 타입을 제공합니다.
//!
//! - [`errors`] - `AppError`, `AppResult`, `ErrorContext`
//! - [`worker`] - 조회 작업을 별도 워커 태스크에서 실행하는 헬퍼

pub mod errors;
pub mod worker;

pub use errors::*;
