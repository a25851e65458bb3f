//! # 사용자 관련 응답 DTO 모듈
//!
//! 비밀번호 해시 등 민감한 정보는 응답에서 제외합니다.
//!
//! - `UserResponse` - 사용자 공개 정보
//! - `LoginResponse` - 세션 토큰을 포함한 로그인 응답
//! - `SessionResponse` - 현재 요청의 세션 정보

pub mod user_response;

pub use user_response::*;
