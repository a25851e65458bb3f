//! 인증/세션 모델

pub mod session_context;

pub use session_context::SessionContext;
