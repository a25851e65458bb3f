//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 현재 세션 조회 엔드포인트입니다.
//! 세션은 [`SessionMiddleware`](crate::middlewares::SessionMiddleware)가 만든
//! [`SessionContext`]를 추출하여 사용합니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/register` - 회원가입
//! - `POST /api/v1/auth/login` - 로그인 및 토큰 발급
//! - `GET /api/v1/auth/me` - 현재 세션 정보
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::{LoginRequest, RegisterRequest, SessionResponse};
use crate::domain::models::auth::SessionContext;
use crate::services::users::UserService;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /auth/register`
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let created = users.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    log::info!("로그인 시도 - 사용자: {}", payload.username);
    let response = users.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 현재 세션 정보 조회
///
/// 익명 세션이면 `logged_in: false`를 반환합니다.
///
/// # Endpoint
/// `GET /auth/me`
#[get("/me")]
pub async fn current_session(session: SessionContext) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SessionResponse::from(&session)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::middlewares::SessionMiddleware;
    use crate::repositories::users::{InMemoryUserStore, UserRepository};
    use crate::services::auth::TokenService;

    fn user_service(tokens: Arc<TokenService>) -> web::Data<UserService> {
        let repo = Arc::new(UserRepository::new(Arc::new(InMemoryUserStore::new())));
        web::Data::new(UserService::new(repo, tokens))
    }

    #[actix_web::test]
    async fn test_register_login_and_me() {
        let tokens = Arc::new(TokenService::new("handler-secret", 1));
        let app = test::init_service(
            App::new()
                .app_data(user_service(tokens.clone()))
                .wrap(SessionMiddleware::new(tokens))
                .service(web::scope("/api/v1/auth").service(register).service(login).service(current_session)),
        )
        .await;

        let credentials = json!({ "username": "alice", "password": "secret" });

        let req = test::TestRequest::post().uri("/api/v1/auth/register").set_json(&credentials).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post().uri("/api/v1/auth/login").set_json(&credentials).to_request();
        let login_body: Value = test::call_and_read_body_json(&app, req).await;
        let token = login_body["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["logged_in"], true);
        assert_eq!(me["username"], "alice");

        let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
        let anonymous: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(anonymous["logged_in"], false);
    }

    #[actix_web::test]
    async fn test_register_validation_and_bad_login() {
        let tokens = Arc::new(TokenService::new("handler-secret", 1));
        let app = test::init_service(
            App::new()
                .app_data(user_service(tokens))
                .service(web::scope("/api/v1/auth").service(register).service(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "username": "a!", "password": "secret" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "username": "nobody", "password": "secret" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
