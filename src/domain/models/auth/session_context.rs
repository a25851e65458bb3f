use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, AppResult};

/// 요청 단위로 전달되는 세션 정보
///
/// 전역 세션 객체 대신 [`SessionMiddleware`](crate::middlewares::SessionMiddleware)가
/// 요청마다 만들어 Request Extensions에 넣고, 핸들러는 이를 추출하여
/// 서비스 호출에 그대로 넘깁니다. 토큰이 없는 요청은 익명 세션입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    user_id: Option<String>,
    username: Option<String>,
}

impl SessionContext {
    /// 로그인하지 않은 세션
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 로그인한 사용자의 세션
    pub fn for_user(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            username: Some(username.into()),
        }
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn current_username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// 로그인한 사용자 ID를 반환하고, 익명 세션이면 `AuthenticationError`를 반환합니다.
    pub fn require_user_id(&self) -> AppResult<&str> {
        self.current_user_id()
            .ok_or_else(|| AppError::AuthenticationError("로그인이 필요합니다".to_string()))
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어가 세션을 넣지 않은 경우 익명 세션을 돌려주므로 추출 자체는 실패하지 않습니다.
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(session))
    }
}
