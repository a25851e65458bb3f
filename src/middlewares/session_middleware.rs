//! 세션 미들웨어
//!
//! 요청마다 `Authorization: Bearer <token>` 헤더를 읽어
//! [`SessionContext`](crate::domain::models::auth::SessionContext)를 만들고 request extension에 넣습니다.
//!
//! | 헤더 상태 | 결과 |
//! |-----------|------|
//! | 없음 | 익명 세션으로 진행 |
//! | 유효한 토큰 | 로그인 세션으로 진행 |
//! | 잘못된 형식/서명/만료 | 401 응답, 핸들러 미호출 |

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::session_inner::SessionMiddlewareService;
use crate::services::auth::TokenService;

/// 세션 미들웨어
pub struct SessionMiddleware {
    tokens: Arc<TokenService>,
}

impl SessionMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}
