//! SessionMiddleware 토큰 해석 로직
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::SessionContext;
use crate::services::auth::TokenService;

/// 실제 세션 해석을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            match session_from_request(&req, &tokens) {
                Ok(session) => {
                    if let Some(user_id) = session.current_user_id() {
                        log::debug!("세션 사용자: {}", user_id);
                    }
                    req.extensions_mut().insert(session);
                },
                Err(err) => {
                    log::warn!("세션 토큰 거부: {}", err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청 헤더에서 세션을 만듭니다. 헤더가 없으면 익명 세션입니다.
fn session_from_request(req: &ServiceRequest, tokens: &TokenService) -> AppResult<SessionContext> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(SessionContext::anonymous());
    };

    let header = header.to_str().map_err(|_| {
        AppError::AuthenticationError("Authorization 헤더를 읽을 수 없습니다".to_string())
    })?;
    let token = tokens.extract_bearer_token(header)?;
    tokens.session_from_token(token)
}
