//! 도서 카탈로그 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 저장소와 서비스를 초기화합니다.
//! 저장소는 `STORAGE_BACKEND`에 따라 MongoDB 또는 인메모리로 구성됩니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use book_catalog_backend::config::{DatabaseConfig, Environment, RateLimitConfig, ServerConfig, StorageBackend};
use book_catalog_backend::db::Database;
use book_catalog_backend::middlewares::SessionMiddleware;
use book_catalog_backend::repositories::books::{BookRepository, BookStore, InMemoryBookStore, MongoBookStore};
use book_catalog_backend::repositories::users::{InMemoryUserStore, MongoUserStore, UserRepository, UserStore};
use book_catalog_backend::routes::configure_all_routes;
use book_catalog_backend::services::auth::TokenService;
use book_catalog_backend::services::books::CatalogService;
use book_catalog_backend::services::users::UserService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 도서 카탈로그 서비스 시작중... ({:?})", Environment::current());

    // 데이터 스토어 초기화
    let (database, book_store, user_store) = initialize_data_stores().await?;

    let token_service = Arc::new(TokenService::from_config());
    let user_repo = Arc::new(UserRepository::new(user_store));
    let book_repo = Arc::new(BookRepository::new(book_store));

    let catalog = web::Data::new(CatalogService::new(book_repo, Arc::clone(&user_repo)));
    let users = web::Data::new(UserService::new(user_repo, Arc::clone(&token_service)));

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    let result = start_http_server(catalog, users, token_service).await;

    if let Some(database) = database {
        database.shutdown().await;
    }

    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화, 세션 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    catalog: web::Data<CatalogService>,
    users: web::Data<UserService>,
    tokens: Arc<TokenService>,
) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Books API: http://{}/api/v1/books", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Rate Limiting 설정이 유효하지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .app_data(users.clone())

            // 나중에 등록한 미들웨어가 바깥쪽에서 먼저 실행됩니다.
            .wrap(SessionMiddleware::new(Arc::clone(&tokens)))
            .wrap(middleware::NormalizePath::trim())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(Governor::new(&governor_conf))

            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// ```bash
/// PROFILE=dev cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=book_catalog_backend::repositories=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 도서/사용자 저장소를 초기화합니다
///
/// MongoDB를 사용하는 경우 연결을 확인하고 인덱스를 생성한 뒤,
/// 종료 시 닫을 수 있도록 [`Database`] 핸들을 함께 반환합니다.
async fn initialize_data_stores() -> io::Result<(Option<Database>, Arc<dyn BookStore>, Arc<dyn UserStore>)> {
    match DatabaseConfig::storage_backend() {
        StorageBackend::Memory => {
            info!("💾 인메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");
            let books: Arc<dyn BookStore> = Arc::new(InMemoryBookStore::new());
            let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
            Ok((None, books, users))
        },
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new().await.map_err(|e| {
                error!("데이터베이스 연결 실패: {}", e);
                io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
            })?;

            let books = MongoBookStore::new(database.books_collection());
            let users = MongoUserStore::new(database.users_collection());

            books.create_indexes().await.map_err(|e| io::Error::other(e.to_string()))?;
            users.create_indexes().await.map_err(|e| io::Error::other(e.to_string()))?;

            let books: Arc<dyn BookStore> = Arc::new(books);
            let users: Arc<dyn UserStore> = Arc::new(users);
            Ok((Some(database), books, users))
        },
    }
}

/// CORS 설정을 구성합니다
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
