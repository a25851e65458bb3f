//! # 도서 카탈로그 서비스 구현
//!
//! HTTP 핸들러가 호출하는 카탈로그 유스케이스를 제공합니다.
//! 세션 확인과 입력 검증을 먼저 수행한 뒤 [`BookRepository`]에 위임합니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    CatalogService                    │
//! │  조회: get_all_books / search_books ─► 워커 태스크     │
//! │  변경: add_book / delete_book / add_* ─► 로그인 필요   │
//! │  리뷰/평점: UserRepository로 세션 사용자 확인         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## 검증 순서
//!
//! 1. 로그인 여부 (`AuthenticationError`)
//! 2. 빈 값, 범위 밖 평점 (`InvalidArgument`, `ValidationError`)
//! 3. 저장소 호출
//!
//! 검증에 실패한 요청은 저장소에 전혀 닿지 않습니다.

use std::sync::Arc;

use log::{debug, info};

use crate::core::errors::{AppError, AppResult};
use crate::core::worker::run_in_background;
use crate::domain::entities::books::{Author, Book, Genre, Rating, Review};
use crate::domain::entities::users::User;
use crate::domain::models::auth::SessionContext;
use crate::repositories::books::{BookRepository, UpsertOutcome};
use crate::repositories::users::UserRepository;
use crate::utils::string_utils::require_text;

/// 도서 카탈로그 서비스
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let catalog = CatalogService::new(book_repo, user_repo);
///
/// let book = catalog
///     .add_book(&session, "Dune", "9780441013593", Genre::new(1, "SciFi"), authors)
///     .await?;
/// let id = book.id_string().unwrap();
///
/// catalog.add_rating(&session, &id, 5).await?;
/// let average = catalog.get_average_rating(&id).await?;
/// ```
#[derive(Clone)]
pub struct CatalogService {
    books: Arc<BookRepository>,
    users: Arc<UserRepository>,
}

impl CatalogService {
    pub fn new(books: Arc<BookRepository>, users: Arc<UserRepository>) -> Self {
        Self { books, users }
    }

    /// 새 도서 등록
    ///
    /// 소유자는 현재 세션의 사용자입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 로그인하지 않은 세션
    /// * `AppError::InvalidArgument` - 빈 제목/ISBN/장르 이름, 저자 없음, 빈 저자 이름
    pub async fn add_book(
        &self,
        session: &SessionContext,
        title: &str,
        isbn: &str,
        genre: Genre,
        authors: Vec<Author>,
    ) -> AppResult<Book> {
        let owner = session.require_user_id()?;

        let title = require_text(title, "제목")?;
        let isbn = require_text(isbn, "ISBN")?;
        require_text(&genre.name, "장르 이름")?;
        if authors.is_empty() {
            return Err(AppError::InvalidArgument("저자를 한 명 이상 지정해야 합니다".to_string()));
        }
        for author in &authors {
            require_text(&author.name, "저자 이름")?;
        }

        let book = Book::new(title, isbn, genre, authors, Some(owner.to_string()));
        let saved = self.books.add(book).await?;

        info!("도서 등록: '{}' (owner={})", saved.title, owner);
        Ok(saved)
    }

    /// 도서 삭제 (로그인 필요)
    pub async fn delete_book(&self, session: &SessionContext, id: &str) -> AppResult<()> {
        let user_id = session.require_user_id()?;
        self.books.delete(id).await?;

        debug!("도서 삭제 요청 처리: {} (user={})", id, user_id);
        Ok(())
    }

    /// 필드/키워드 검색
    ///
    /// 워커 태스크에서 실행됩니다. 필드 이름과 키워드 검증은 저장소 계층에서 수행합니다.
    pub async fn search_books(&self, field: &str, keyword: &str) -> AppResult<Vec<Book>> {
        let books = Arc::clone(&self.books);
        let field = field.to_string();
        let keyword = keyword.to_string();

        run_in_background("search_books", async move { books.search(&field, &keyword).await }).await
    }

    /// 전체 도서 목록 (워커 태스크에서 실행)
    pub async fn get_all_books(&self) -> AppResult<Vec<Book>> {
        let books = Arc::clone(&self.books);
        run_in_background("get_all_books", async move { books.get_all().await }).await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    /// 제목이 대소문자 구분 없이 정확히 일치하는 첫 도서를 찾습니다.
    pub async fn find_book_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let title = require_text(title, "제목")?;
        let wanted = title.to_lowercase();

        let candidates = self.search_books("title", &title).await?;
        Ok(candidates
            .into_iter()
            .find(|book| book.title.to_lowercase() == wanted))
    }

    /// 평점 추가 또는 교체
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 로그인하지 않은 세션
    /// * `AppError::ValidationError` - 1-5 범위를 벗어난 값 (저장소 호출 없음)
    /// * `AppError::NotFound` - 세션 사용자가 더 이상 존재하지 않음
    pub async fn add_rating(&self, session: &SessionContext, book_id: &str, value: i32) -> AppResult<UpsertOutcome> {
        let user_id = session.require_user_id()?;
        let rating = Rating::new(user_id, value)?;
        self.session_user(user_id).await?;

        let outcome = self.books.add_or_replace_rating(book_id, &rating).await?;
        info!("평점 {:?}: book={} user={} value={}", outcome, book_id, user_id, value);
        Ok(outcome)
    }

    /// 리뷰 추가 또는 교체
    ///
    /// 작성자 사용자명은 사용자 저장소에서 다시 읽어 스냅샷으로 저장하고,
    /// 날짜는 오늘(서버 로컬 날짜)입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 로그인하지 않은 세션
    /// * `AppError::InvalidArgument` - 빈 리뷰 내용
    /// * `AppError::NotFound` - 세션 사용자가 더 이상 존재하지 않음
    pub async fn add_review(&self, session: &SessionContext, book_id: &str, text: &str) -> AppResult<UpsertOutcome> {
        let user_id = session.require_user_id()?;
        let text = require_text(text, "리뷰 내용")?;

        let user = self.session_user(user_id).await?;

        let today = chrono::Local::now().date_naive();
        let review = Review::new(user_id, text, today, user.username)?;

        let outcome = self.books.add_or_replace_review(book_id, &review).await?;
        info!("리뷰 {:?}: book={} user={}", outcome, book_id, user_id);
        Ok(outcome)
    }

    async fn session_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
    }

    /// 저자 추가 또는 연결 사용자 교체 (로그인 필요)
    pub async fn add_author(&self, session: &SessionContext, book_id: &str, author: Author) -> AppResult<UpsertOutcome> {
        session.require_user_id()?;
        require_text(&author.name, "저자 이름")?;

        self.books.add_or_replace_author(book_id, &author).await
    }

    pub async fn get_reviews_by_book_id(&self, book_id: &str) -> AppResult<Vec<Review>> {
        self.books.get_reviews(book_id).await
    }

    /// 평균 평점 (평점이 없으면 0.0)
    pub async fn get_average_rating(&self, book_id: &str) -> AppResult<f64> {
        let book = self.books.get_by_id(book_id).await?;
        Ok(book.average_rating())
    }

    pub async fn all_genres(&self) -> AppResult<Vec<Genre>> {
        self.books.all_genres().await
    }

    pub async fn all_authors(&self) -> AppResult<Vec<Author>> {
        self.books.all_authors_across_books().await
    }
}
