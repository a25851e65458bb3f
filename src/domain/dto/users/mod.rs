//! # User Data Transfer Objects Module
//!
//! 회원가입, 로그인, 현재 세션 조회 API의 요청/응답 데이터 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/     # RegisterRequest, LoginRequest
//! └── response/    # UserResponse, LoginResponse, SessionResponse
//! ```
//!
//! ## JSON 예제
//!
//! ```json
//! POST /api/v1/auth/login
//! { "username": "alice", "password": "secret" }
//!
//! 200 OK
//! {
//!   "user": { "id": "507f1f77bcf86cd799439011", "username": "alice" },
//!   "access_token": "eyJhbGciOiJIUzI1NiIs...",
//!   "token_type": "Bearer",
//!   "expires_in": 86400
//! }
//! ```

pub mod request;
pub mod response;

// Re-exports for convenience
pub use request::*;
pub use response::*;
