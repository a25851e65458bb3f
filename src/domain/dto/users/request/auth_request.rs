//! 인증 요청관련 DTO
//!
//! 회원가입과 로그인 요청 정보를 매핑합니다.
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 사용자명 (3-30자, 영문/숫자/언더스코어만 허용)
    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(min = 4, message = "비밀번호는 최소 4자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}
