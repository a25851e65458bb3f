//! # 문자열 유틸리티
//!
//! 입력 문자열 검증과 정리에 쓰이는 공통 함수들입니다.

use serde::Deserialize;

use crate::core::errors::{AppError, AppResult};

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 `InvalidArgument`를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::require_text;
///
/// assert_eq!(require_text("  Dune  ", "제목").unwrap(), "Dune");
/// assert!(require_text("   ", "제목").is_err());
/// ```
pub fn require_text(value: &str, field_name: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "{}은(는) 비어 있을 수 없습니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// 값이 없거나 공백뿐이면 `None`, 아니면 앞뒤 공백을 제거한 값을 돌려줍니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
///
/// ```rust,ignore
/// // JSON: {"linked_user_id": "  abc  "} → Some("abc")
/// // JSON: {"linked_user_id": ""}        → None
/// // JSON: {"linked_user_id": null}      → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
