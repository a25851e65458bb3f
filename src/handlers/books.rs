//! Book Catalog HTTP Handlers
//!
//! 도서 카탈로그 엔드포인트입니다. 모든 핸들러는 `/api/v1/books` 스코프 아래에 등록되며,
//! 변경 요청(등록, 삭제, 평점, 리뷰, 저자)은 로그인 세션이 필요합니다.
//!
//! # Endpoints
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | GET | `/` | 전체 도서 |
//! | POST | `/` | 도서 등록 |
//! | GET | `/search?field=&keyword=` | 필드 검색 |
//! | GET | `/by-title?title=` | 제목 정확히 일치 |
//! | GET | `/genres` | 장르 목록 |
//! | GET | `/authors` | 저자 목록 |
//! | GET/DELETE | `/{id}` | 도서 조회/삭제 |
//! | POST | `/{id}/ratings` | 평점 추가 또는 교체 |
//! | GET | `/{id}/rating` | 평균 평점 |
//! | POST/GET | `/{id}/reviews` | 리뷰 추가 또는 교체, 리뷰 목록 |
//! | POST | `/{id}/authors` | 저자 추가 또는 교체 |
//!
//! 고정 경로(`search`, `by-title`, `genres`, `authors`)는 `/{id}`보다 먼저 등록해야 합니다.
use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::books::{
    AddBookRequest, AddRatingRequest, AddReviewRequest, AuthorRequest, AuthorResponse,
    AverageRatingResponse, BookResponse, GenreResponse, ReviewResponse, SearchQuery, TitleQuery,
    UpsertResponse,
};
use crate::domain::entities::books::Book;
use crate::domain::models::auth::SessionContext;
use crate::services::books::CatalogService;

fn book_list(books: Vec<Book>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

/// 전체 도서 목록
#[get("")]
pub async fn get_all_books(catalog: web::Data<CatalogService>) -> Result<HttpResponse, AppError> {
    let books = catalog.get_all_books().await?;
    Ok(HttpResponse::Ok().json(book_list(books)))
}

/// 도서 등록 핸들러
///
/// # Endpoint
/// `POST /books`
///
/// # Errors
///
/// * 400 - 검증 실패 (빈 제목/ISBN, 저자 없음, 잘못된 날짜 형식)
/// * 401 - 로그인하지 않은 세션
#[post("")]
pub async fn add_book(
    catalog: web::Data<CatalogService>,
    session: SessionContext,
    payload: web::Json<AddBookRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let authors = request.authors.into_iter().map(Into::into).collect();

    let book = catalog
        .add_book(&session, &request.title, &request.isbn, request.genre.into(), authors)
        .await?;

    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

/// 필드 검색 (`title`, `author`, `isbn`, `genre`)
#[get("/search")]
pub async fn search_books(
    catalog: web::Data<CatalogService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let books = catalog.search_books(&query.field, &query.keyword).await?;
    Ok(HttpResponse::Ok().json(book_list(books)))
}

#[get("/by-title")]
pub async fn find_book_by_title(
    catalog: web::Data<CatalogService>,
    query: web::Query<TitleQuery>,
) -> Result<HttpResponse, AppError> {
    let book = catalog
        .find_book_by_title(&query.title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("제목이 '{}'인 도서가 없습니다", query.title)))?;

    Ok(HttpResponse::Ok().json(BookResponse::from(book)))
}

#[get("/genres")]
pub async fn all_genres(catalog: web::Data<CatalogService>) -> Result<HttpResponse, AppError> {
    let genres: Vec<GenreResponse> = catalog.all_genres().await?.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(genres))
}

#[get("/authors")]
pub async fn all_authors(catalog: web::Data<CatalogService>) -> Result<HttpResponse, AppError> {
    let authors: Vec<AuthorResponse> = catalog.all_authors().await?.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(authors))
}

#[get("/{id}")]
pub async fn get_book(
    catalog: web::Data<CatalogService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = catalog.get_book(&id).await?;
    Ok(HttpResponse::Ok().json(BookResponse::from(book)))
}

/// 도서 삭제 (없는 도서도 204)
#[delete("/{id}")]
pub async fn delete_book(
    catalog: web::Data<CatalogService>,
    session: SessionContext,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    catalog.delete_book(&session, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 평점 추가 또는 교체
///
/// # Endpoint
/// `POST /books/{id}/ratings`
#[post("/{id}/ratings")]
pub async fn add_rating(
    catalog: web::Data<CatalogService>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<AddRatingRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = catalog.add_rating(&session, &id, payload.rating).await?;
    Ok(HttpResponse::Ok().json(UpsertResponse::new(id.into_inner(), outcome)))
}

#[get("/{id}/rating")]
pub async fn get_average_rating(
    catalog: web::Data<CatalogService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let average_rating = catalog.get_average_rating(&id).await?;
    Ok(HttpResponse::Ok().json(AverageRatingResponse {
        book_id: id.into_inner(),
        average_rating,
    }))
}

/// 리뷰 추가 또는 교체
///
/// # Endpoint
/// `POST /books/{id}/reviews`
#[post("/{id}/reviews")]
pub async fn add_review(
    catalog: web::Data<CatalogService>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<AddReviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = catalog.add_review(&session, &id, &payload.text).await?;
    Ok(HttpResponse::Ok().json(UpsertResponse::new(id.into_inner(), outcome)))
}

#[get("/{id}/reviews")]
pub async fn get_reviews(
    catalog: web::Data<CatalogService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let reviews: Vec<ReviewResponse> = catalog
        .get_reviews_by_book_id(&id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(reviews))
}

#[post("/{id}/authors")]
pub async fn add_author(
    catalog: web::Data<CatalogService>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<AuthorRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = catalog.add_author(&session, &id, payload.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(UpsertResponse::new(id.into_inner(), outcome)))
}
