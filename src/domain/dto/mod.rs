//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! 요청 DTO는 `serde`로 역직렬화하고 `validator`로 형식 규칙을 검증하며,
//! 응답 DTO는 도메인 엔티티에서 `From`으로 변환됩니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── books/      # 도서, 리뷰, 평점, 저자 요청/응답
//! └── users/      # 회원가입, 로그인, 세션 요청/응답
//! ```
//!
//! ## 핸들러에서의 사용
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn add_book(
//!     catalog: web::Data<CatalogService>,
//!     session: SessionContext,
//!     payload: web::Json<AddBookRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let book = catalog.add_book(&session, payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(BookResponse::from(book)))
//! }
//! ```

pub mod books;
pub mod users;
