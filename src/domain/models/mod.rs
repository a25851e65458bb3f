//! 도메인 모델 모듈
//!
//! 저장되지 않는 요청 단위 모델(세션, 토큰 클레임)을 정의합니다.

pub mod auth;
pub mod token;
