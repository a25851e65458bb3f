//! # Application Error System
//!
//! 카탈로그 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 메시지를 정의하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 연산자만으로 적절한 HTTP 응답이 만들어지도록 합니다.
//!
//! ## 에러 분류
//!
//! | 변형 | 의미 | HTTP |
//! |------|------|------|
//! | `InvalidArgument` | 필수 입력 누락, 잘못된 검색 필드 | 400 |
//! | `InvalidIdentifier` | ObjectId 형식이 아닌 식별자 | 400 |
//! | `ValidationError` | 범위를 벗어난 평점, 빈 리뷰 등 | 400 |
//! | `NotFound` | 도서/사용자 없음 | 404 |
//! | `AuthenticationError` | 로그인 필요, 잘못된 자격 증명/토큰 | 401 |
//! | `ConflictError` | 사용자명 중복 | 409 |
//! | `MalformedRecordError` | 저장된 문서가 예상 형태와 다름 | 500 |
//! | `PersistenceError` | 저장소가 생성 ID/쓰기 확인을 돌려주지 않음 | 500 |
//! | `DatabaseError` | MongoDB 드라이버 오류 | 500 |
//! | `InternalError` | 그 밖의 내부 오류 | 500 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! fn parse_rating(value: i32) -> AppResult<i32> {
//!     if !(1..=5).contains(&value) {
//!         return Err(AppError::ValidationError("평점은 1에서 5 사이여야 합니다".to_string()));
//!     }
//!     Ok(value)
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 리포지토리는 이 에러를 복구 없이 그대로 서비스 계층에 전달하고,
/// 서비스 계층은 저장소 호출 전에 가능한 입력 오류를 미리 걸러냅니다.
/// 어떤 계층도 재시도하지 않습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 필수 값 누락 또는 허용되지 않은 열거 값 (400 Bad Request)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 저장소 식별자 형식 오류 (400 Bad Request)
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// 도메인 규칙 위반 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 참조한 리소스가 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 또는 로그인 필요 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 저장된 문서가 기대한 형태가 아님 (500 Internal Server Error)
    #[error("Malformed record: {0}")]
    MalformedRecordError(String),

    /// 저장소가 생성 ID나 쓰기 확인을 반환하지 않음 (500 Internal Server Error)
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// 데이터베이스 드라이버 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::InvalidArgument(_)
            | AppError::InvalidIdentifier(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 에러를 `{"error": "..."}` 형태의 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        for error in [
            AppError::InvalidArgument("field".to_string()),
            AppError::InvalidIdentifier("abc".to_string()),
            AppError::ValidationError("rating".to_string()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Book not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("login required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_errors_are_internal() {
        for error in [
            AppError::MalformedRecordError("bad date".to_string()),
            AppError::PersistenceError("no id".to_string()),
            AppError::DatabaseError("down".to_string()),
        ] {
            assert_eq!(
                error.error_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
