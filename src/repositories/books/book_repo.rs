//! # 도서 리포지토리 구현
//!
//! `Book` 애그리거트의 데이터 액세스 계층입니다.
//! 문서 변환은 [`mapper`](super::mapper), 내장 배열 업서트는
//! [`UpsertEngine`](super::upsert::UpsertEngine)에 맡기고, 실제 저장은
//! [`BookStore`](super::store::BookStore) 구현체가 담당합니다.
//!
//! ## 특징
//!
//! - **저장소 독립**: MongoDB와 인메모리 저장소가 같은 의미로 동작
//! - **사용자별 유일성**: 리뷰/평점은 도서당 사용자별 1개, 저자는 `(name, birthdate)`별 1개
//! - **검증된 읽기**: 형태가 어긋난 문서는 `MalformedRecordError`로 거부
//! - **오류 전달**: 저장소 오류는 복구나 재시도 없이 그대로 호출자에게 전달

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info};
use mongodb::bson::{oid::ObjectId, Bson};

use super::mapper::{self, fields};
use super::store::{BookFilter, BookStore, SearchField};
use super::upsert::{UpsertEngine, UpsertOutcome};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::books::{Author, Book, Genre, Rating, Review};

/// 도서 데이터 액세스 리포지토리
///
/// ## 저장 형태
///
/// - **컬렉션명**: `books`
/// - **내장 배열**: `authors`, `reviews`, `ratings`
/// - **식별자**: 저장소가 삽입 시 부여하는 `ObjectId`
///
/// ## 에러 처리
///
/// 모든 메서드는 `AppResult<T>`를 반환합니다.
///
/// - **InvalidIdentifier**: ObjectId 형식이 아닌 ID
/// - **NotFound**: 대상 도서가 없음
/// - **InvalidArgument**: 알 수 없는 검색 필드, 빈 키워드
/// - **ValidationError**: 범위를 벗어난 평점
/// - **MalformedRecordError**: 저장된 문서 형태 오류
/// - **PersistenceError**: 저장소가 생성 ID를 돌려주지 않음
/// - **DatabaseError**: 저장소 드라이버 오류
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use crate::repositories::books::{BookRepository, InMemoryBookStore};
///
/// async fn book_operations() -> AppResult<()> {
///     let repo = BookRepository::new(Arc::new(InMemoryBookStore::new()));
///
///     let saved = repo.add(book).await?;
///     let id = saved.id_string().unwrap();
///
///     repo.add_or_replace_rating(&id, Rating::new("u1", 5)?).await?;
///     let dune = repo.search("title", "dune").await?;
///
///     repo.delete(&id).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BookRepository {
    /// 도서 문서 저장소
    store: Arc<dyn BookStore>,

    /// 내장 배열 업서트 엔진 (키 잠금 테이블 포함)
    upserts: UpsertEngine,
}

/// 문자열 ID를 `ObjectId`로 해석합니다.
pub fn parse_book_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::InvalidIdentifier(format!("유효하지 않은 도서 ID 형식입니다: '{}'", id)))
}

fn book_not_found(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("도서를 찾을 수 없습니다: {}", id.to_hex()))
}

impl BookRepository {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        let upserts = UpsertEngine::new(Arc::clone(&store));
        Self { store, upserts }
    }

    /// 모든 도서 조회
    ///
    /// 저장소에 저장된 순서대로 모든 도서를 반환합니다.
    /// 하나라도 형태가 어긋난 문서가 있으면 `MalformedRecordError`로 실패합니다.
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        let documents = self.store.find(BookFilter::All).await?;
        let books = documents
            .iter()
            .map(mapper::from_document)
            .collect::<AppResult<Vec<_>>>()?;

        debug!("도서 {}권 조회", books.len());
        Ok(books)
    }

    /// ID로 도서 조회
    ///
    /// # 인자
    ///
    /// * `id` - 도서 ID (ObjectId 16진 문자열)
    ///
    /// # 반환값
    ///
    /// * `Ok(Book)` - 도서를 찾은 경우
    /// * `Err(AppError::InvalidIdentifier)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::NotFound)` - 해당 ID의 도서가 없음
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let object_id = parse_book_id(id)?;
        self.find_by_object_id(&object_id).await
    }

    async fn find_by_object_id(&self, id: &ObjectId) -> AppResult<Book> {
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| book_not_found(id))?;

        mapper::from_document(&document)
    }

    /// 새 도서 저장
    ///
    /// 리뷰와 평점은 비운 상태로 저장하고, 저장소가 부여한 ID를 채워 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Book)` - ID가 채워진 저장된 도서
    /// * `Err(AppError::PersistenceError)` - 저장소가 생성 ID를 보고하지 않음
    /// * `Err(AppError::DatabaseError)` - 저장소 오류
    pub async fn add(&self, mut book: Book) -> AppResult<Book> {
        book.id = None;
        book.reviews.clear();
        book.ratings.clear();

        let inserted = self.store.insert(mapper::to_document(&book)).await?;
        let id = inserted.ok_or_else(|| {
            AppError::PersistenceError(format!("도서 '{}' 저장 후 생성된 ID를 받지 못했습니다", book.title))
        })?;

        book.id = Some(id);
        info!("📚 도서 저장: {} ({})", book.title, id.to_hex());
        Ok(book)
    }

    /// 도서 전체 갱신
    ///
    /// 제목, ISBN, 장르, 저자, 리뷰, 평점, 소유자를 모두 `book`의 값으로 덮어씁니다.
    ///
    /// # 반환값
    ///
    /// * `Err(AppError::InvalidIdentifier)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::InvalidArgument)` - 빈 제목/ISBN 또는 저자 없음
    /// * `Err(AppError::ValidationError)` - 범위 밖 평점, 빈 리뷰, 같은 사용자의 중복 리뷰/평점
    /// * `Err(AppError::NotFound)` - 일치하는 도서가 없음
    pub async fn update(&self, id: &str, book: &Book) -> AppResult<()> {
        let object_id = parse_book_id(id)?;
        check_replacement(book)?;

        let counts = self
            .store
            .replace_fields(&object_id, mapper::to_document(book))
            .await?;
        if counts.matched == 0 {
            return Err(book_not_found(&object_id));
        }

        debug!("도서 갱신: {} (modified={})", object_id, counts.modified);
        Ok(())
    }

    /// 도서 삭제
    ///
    /// 해당 ID의 도서가 없으면 아무 일도 하지 않습니다.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_book_id(id)?;
        let deleted = self.store.delete(&object_id).await?;

        if deleted > 0 {
            info!("🗑️ 도서 삭제: {}", object_id);
        } else {
            debug!("삭제할 도서가 없습니다: {}", object_id);
        }
        Ok(())
    }

    /// 리뷰 추가 또는 교체
    ///
    /// 같은 사용자의 리뷰가 있으면 내용과 날짜를 교체하고, 없으면 새로 추가합니다.
    /// 교체 시 작성자 사용자명 스냅샷은 처음 값을 유지합니다.
    /// 리뷰 내용이 비어 있으면 저장소를 호출하기 전에 `ValidationError`를 반환합니다.
    pub async fn add_or_replace_review(&self, book_id: &str, review: &Review) -> AppResult<UpsertOutcome> {
        check_review_text(&review.text)?;
        let object_id = parse_book_id(book_id)?;
        let key = [(fields::USER_ID, Bson::String(review.author_user_id.clone()))];
        let replacement = mongodb::bson::doc! {
            fields::REVIEW_TEXT: review.text.as_str(),
            fields::REVIEW_DATE: mapper::format_date(review.date),
        };

        self.upserts
            .upsert_by_key(
                &object_id,
                fields::REVIEWS,
                &key,
                replacement,
                mapper::review_to_document(review),
            )
            .await
    }

    /// 평점 추가 또는 교체
    ///
    /// 평점 값이 1-5 범위를 벗어나면 저장소를 호출하기 전에 `ValidationError`를 반환합니다.
    pub async fn add_or_replace_rating(&self, book_id: &str, rating: &Rating) -> AppResult<UpsertOutcome> {
        Rating::check_value(rating.value)?;
        let object_id = parse_book_id(book_id)?;
        let key = [(fields::USER_ID, Bson::String(rating.author_user_id.clone()))];
        let replacement = mongodb::bson::doc! { fields::RATING_VALUE: rating.value };

        self.upserts
            .upsert_by_key(
                &object_id,
                fields::RATINGS,
                &key,
                replacement,
                mapper::rating_to_document(rating),
            )
            .await
    }

    /// 저자 추가 또는 교체
    ///
    /// `(name, birthdate)`가 같은 저자가 있으면 연결 사용자만 교체합니다.
    pub async fn add_or_replace_author(&self, book_id: &str, author: &Author) -> AppResult<UpsertOutcome> {
        let object_id = parse_book_id(book_id)?;
        let key = [
            (fields::AUTHOR_NAME, Bson::String(author.name.clone())),
            (fields::AUTHOR_BIRTHDATE, Bson::String(mapper::format_date(author.birthdate))),
        ];
        let linked = match &author.linked_user_id {
            Some(user_id) => Bson::String(user_id.clone()),
            None => Bson::Null,
        };
        let replacement = mongodb::bson::doc! { fields::USER_ID: linked };

        self.upserts
            .upsert_by_key(
                &object_id,
                fields::AUTHORS,
                &key,
                replacement,
                mapper::author_to_document(author),
            )
            .await
    }

    /// 키워드 검색
    ///
    /// # 인자
    ///
    /// * `field` - `title`, `author`, `genre`, `isbn` 중 하나 (대소문자 무시)
    /// * `keyword` - 부분 일치 키워드 (대소문자 무시, 정규식 문자는 문자 그대로 취급)
    ///
    /// # 반환값
    ///
    /// * `Err(AppError::InvalidArgument)` - 알 수 없는 필드 또는 빈 키워드
    pub async fn search(&self, field: &str, keyword: &str) -> AppResult<Vec<Book>> {
        let field: SearchField = field.parse()?;
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::InvalidArgument("검색 키워드가 비어 있습니다".to_string()));
        }

        let documents = self
            .store
            .find(BookFilter::Keyword {
                field,
                keyword: keyword.to_string(),
            })
            .await?;
        let books = documents
            .iter()
            .map(mapper::from_document)
            .collect::<AppResult<Vec<_>>>()?;

        debug!("검색 {}='{}': {}건", field, keyword, books.len());
        Ok(books)
    }

    /// 모든 도서의 장르를 `(id, name)` 기준으로 중복 제거하여 처음 나온 순서대로 반환합니다.
    pub async fn all_genres(&self) -> AppResult<Vec<Genre>> {
        let books = self.get_all().await?;
        let mut seen = HashSet::new();

        Ok(books
            .into_iter()
            .map(|book| book.genre)
            .filter(|genre| seen.insert(genre.clone()))
            .collect())
    }

    /// 모든 도서의 저자를 `(name, birthdate)` 기준으로 중복 제거하여 반환합니다.
    /// 연결 사용자 정보는 포함하지 않습니다.
    pub async fn all_authors_across_books(&self) -> AppResult<Vec<Author>> {
        let books = self.get_all().await?;
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

        Ok(books
            .into_iter()
            .flat_map(|book| book.authors)
            .filter(|author| seen.insert((author.name.clone(), author.birthdate)))
            .map(|author| Author::new(author.name, author.birthdate, None))
            .collect())
    }

    pub async fn get_reviews(&self, book_id: &str) -> AppResult<Vec<Review>> {
        Ok(self.get_by_id(book_id).await?.reviews)
    }

    pub async fn get_ratings(&self, book_id: &str) -> AppResult<Vec<Rating>> {
        Ok(self.get_by_id(book_id).await?.ratings)
    }

    pub async fn get_authors(&self, book_id: &str) -> AppResult<Vec<Author>> {
        Ok(self.get_by_id(book_id).await?.authors)
    }

    /// 도서에 `(name, birthdate)`가 같은 저자가 있는지 확인합니다.
    /// 도서가 없으면 `false`입니다.
    pub async fn author_exists_in_book(&self, book_id: &str, name: &str, birthdate: NaiveDate) -> AppResult<bool> {
        let object_id = parse_book_id(book_id)?;
        if name.trim().is_empty() {
            return Err(AppError::InvalidArgument("저자 이름은 비어 있을 수 없습니다".to_string()));
        }

        match self.find_by_object_id(&object_id).await {
            Ok(book) => Ok(book.authors.iter().any(|a| a.identity() == (name, birthdate))),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn check_review_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::ValidationError("리뷰 내용은 비어 있을 수 없습니다".to_string()));
    }
    Ok(())
}

/// 전체 갱신 전에 도서 불변식을 확인합니다.
///
/// 평점은 1-5, 리뷰/평점은 사용자별 1개, 제목과 ISBN은 비어 있지 않고 저자는 한 명 이상.
fn check_replacement(book: &Book) -> AppResult<()> {
    if book.title.trim().is_empty() {
        return Err(AppError::InvalidArgument("도서 제목이 비어 있습니다".to_string()));
    }
    if book.isbn.trim().is_empty() {
        return Err(AppError::InvalidArgument("ISBN이 비어 있습니다".to_string()));
    }
    if book.authors.is_empty() {
        return Err(AppError::InvalidArgument("도서에는 저자가 한 명 이상 필요합니다".to_string()));
    }

    let mut raters = HashSet::new();
    for rating in &book.ratings {
        Rating::check_value(rating.value)?;
        if !raters.insert(rating.author_user_id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "사용자 {}의 평점이 중복되었습니다",
                rating.author_user_id
            )));
        }
    }

    let mut reviewers = HashSet::new();
    for review in &book.reviews {
        check_review_text(&review.text)?;
        if !reviewers.insert(review.author_user_id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "사용자 {}의 리뷰가 중복되었습니다",
                review.author_user_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::books::memory_store::InMemoryBookStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn herbert() -> Author {
        Author::new("Frank Herbert", date(1920, 10, 8), None)
    }

    fn book(title: &str, genre: Genre, authors: Vec<Author>) -> Book {
        Book::new(title, format!("isbn-{}", title), genre, authors, Some("owner".to_string()))
    }

    fn repo() -> (BookRepository, Arc<InMemoryBookStore>) {
        let store = Arc::new(InMemoryBookStore::new());
        (BookRepository::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn test_add_assigns_id_and_clears_reviews_and_ratings() {
        let (repo, _) = repo();
        let mut dune = book("Dune", Genre::new(1, "SciFi"), vec![herbert()]);
        dune.ratings.push(Rating::new("u1", 5).unwrap());
        dune.reviews.push(Review::new("u1", "great", date(2024, 1, 1), "alice").unwrap());

        let saved = repo.add(dune).await.unwrap();

        assert!(saved.id_string().is_some_and(|id| !id.is_empty()));
        assert!(saved.reviews.is_empty());
        assert!(saved.ratings.is_empty());

        let loaded = repo.get_by_id(&saved.id_string().unwrap()).await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[actix_web::test]
    async fn test_get_by_id_rejects_malformed_and_missing_ids() {
        let (repo, _) = repo();

        assert!(matches!(
            repo.get_by_id("not-an-id").await,
            Err(AppError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            repo.get_by_id(&ObjectId::new().to_hex()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_delete_then_get_is_not_found_and_second_delete_is_noop() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        repo.delete(&id).await.unwrap();
        assert!(matches!(repo.get_by_id(&id).await, Err(AppError::NotFound(_))));
        assert!(repo.delete(&id).await.is_ok());
    }

    #[actix_web::test]
    async fn test_update_overwrites_fields_and_reports_missing() {
        let (repo, _) = repo();
        let mut saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        saved.title = "Dune (Revised)".to_string();
        saved.ratings.push(Rating::new("u7", 2).unwrap());
        repo.update(&id, &saved).await.unwrap();

        let loaded = repo.get_by_id(&id).await.unwrap();
        assert_eq!(loaded.title, "Dune (Revised)");
        assert_eq!(loaded.ratings.len(), 1);

        assert!(matches!(
            repo.update(&ObjectId::new().to_hex(), &saved).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_update_rejects_invalid_book_and_keeps_stored_copy() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        let mut bad_rating = saved.clone();
        bad_rating.ratings.push(Rating { author_user_id: "u1".to_string(), value: 9 });
        assert!(matches!(repo.update(&id, &bad_rating).await, Err(AppError::ValidationError(_))));

        let mut twice_rated = saved.clone();
        twice_rated.ratings.push(Rating::new("u1", 4).unwrap());
        twice_rated.ratings.push(Rating::new("u1", 2).unwrap());
        assert!(matches!(repo.update(&id, &twice_rated).await, Err(AppError::ValidationError(_))));

        let mut twice_reviewed = saved.clone();
        twice_reviewed.reviews.push(Review::new("u1", "good", date(2024, 1, 1), "alice").unwrap());
        twice_reviewed.reviews.push(Review::new("u1", "bad", date(2024, 1, 2), "alice").unwrap());
        assert!(matches!(repo.update(&id, &twice_reviewed).await, Err(AppError::ValidationError(_))));

        let mut untitled = saved.clone();
        untitled.title = "  ".to_string();
        assert!(matches!(repo.update(&id, &untitled).await, Err(AppError::InvalidArgument(_))));

        let mut no_isbn = saved.clone();
        no_isbn.isbn = String::new();
        assert!(matches!(repo.update(&id, &no_isbn).await, Err(AppError::InvalidArgument(_))));

        let mut no_authors = saved.clone();
        no_authors.authors.clear();
        assert!(matches!(repo.update(&id, &no_authors).await, Err(AppError::InvalidArgument(_))));

        assert_eq!(repo.get_by_id(&id).await.unwrap(), saved);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
        assert_eq!(repo.all_genres().await.unwrap(), vec![Genre::new(1, "SciFi")]);
    }

    #[actix_web::test]
    async fn test_blank_review_text_leaves_store_untouched() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        let blank = Review {
            author_user_id: "u1".to_string(),
            text: " ".to_string(),
            date: date(2024, 1, 1),
            author_username: "alice".to_string(),
        };
        assert!(matches!(
            repo.add_or_replace_review(&id, &blank).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(repo.get_reviews(&id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_first_rating_and_review_on_null_arrays() {
        let (repo, store) = repo();
        let id = store
            .insert(mongodb::bson::doc! {
                "title": "Dune",
                "isbn": "isbn-Dune",
                "genre": { "id": 1, "name": "SciFi" },
                "authors": [{ "name": "Frank Herbert", "birthdate": "1920-10-08" }],
                "reviews": null,
                "ratings": null,
            })
            .await
            .unwrap()
            .unwrap()
            .to_hex();

        assert_eq!(
            repo.add_or_replace_rating(&id, &Rating::new("u1", 4).unwrap()).await.unwrap(),
            UpsertOutcome::Inserted
        );
        assert_eq!(
            repo.add_or_replace_review(&id, &Review::new("u1", "good", date(2024, 1, 1), "alice").unwrap())
                .await
                .unwrap(),
            UpsertOutcome::Inserted
        );
        assert_eq!(repo.get_ratings(&id).await.unwrap(), vec![Rating::new("u1", 4).unwrap()]);
        assert_eq!(repo.get_reviews(&id).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_same_user_rating_twice_keeps_later_value() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        let first = repo.add_or_replace_rating(&id, &Rating::new("u1", 3).unwrap()).await.unwrap();
        let second = repo.add_or_replace_rating(&id, &Rating::new("u1", 5).unwrap()).await.unwrap();

        assert_eq!(first, UpsertOutcome::Inserted);
        assert_eq!(second, UpsertOutcome::Updated);
        let ratings = repo.get_ratings(&id).await.unwrap();
        assert_eq!(ratings, vec![Rating::new("u1", 5).unwrap()]);
    }

    #[actix_web::test]
    async fn test_same_user_review_twice_keeps_later_text_and_date() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        repo.add_or_replace_review(&id, &Review::new("u1", "good", date(2024, 1, 1), "alice").unwrap())
            .await
            .unwrap();
        repo.add_or_replace_review(&id, &Review::new("u1", "superb", date(2024, 2, 1), "alice").unwrap())
            .await
            .unwrap();

        let reviews = repo.get_reviews(&id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "superb");
        assert_eq!(reviews[0].date, date(2024, 2, 1));
        assert_eq!(reviews[0].author_username, "alice");
    }

    #[actix_web::test]
    async fn test_out_of_range_rating_leaves_store_untouched() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        let invalid = Rating { author_user_id: "u1".to_string(), value: 6 };
        assert!(matches!(
            repo.add_or_replace_rating(&id, &invalid).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(repo.get_ratings(&id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_rating_for_missing_book_is_not_found() {
        let (repo, _) = repo();
        let result = repo
            .add_or_replace_rating(&ObjectId::new().to_hex(), &Rating::new("u1", 4).unwrap())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_author_upsert_is_keyed_on_name_and_birthdate() {
        let (repo, _) = repo();
        let saved = repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        let id = saved.id_string().unwrap();

        let linked = Author::new("Frank Herbert", date(1920, 10, 8), Some("u5".to_string()));
        assert_eq!(repo.add_or_replace_author(&id, &linked).await.unwrap(), UpsertOutcome::Updated);

        let namesake = Author::new("Frank Herbert", date(1950, 1, 1), None);
        assert_eq!(repo.add_or_replace_author(&id, &namesake).await.unwrap(), UpsertOutcome::Inserted);

        let authors = repo.get_authors(&id).await.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].linked_user_id.as_deref(), Some("u5"));
        assert!(repo.author_exists_in_book(&id, "Frank Herbert", date(1950, 1, 1)).await.unwrap());
        assert!(!repo.author_exists_in_book(&id, "Frank Herbert", date(1999, 1, 1)).await.unwrap());
        assert!(!repo
            .author_exists_in_book(&ObjectId::new().to_hex(), "Frank Herbert", date(1920, 10, 8))
            .await
            .unwrap());
    }

    #[actix_web::test]
    async fn test_search_by_title_and_genre() {
        let (repo, _) = repo();
        repo.add(book("Dune Messiah", Genre::new(1, "Science Fiction"), vec![herbert()])).await.unwrap();
        repo.add(book("Foundation", Genre::new(2, "Classics"), vec![Author::new("Isaac Asimov", date(1920, 1, 2), None)]))
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .search("title", "dune")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Dune Messiah".to_string()]);

        let scifi = repo.search("GENRE", "sci").await.unwrap();
        assert_eq!(scifi.len(), 1);
        assert_eq!(scifi[0].genre.name, "Science Fiction");

        let by_author = repo.search("author", "asimov").await.unwrap();
        assert_eq!(by_author[0].title, "Foundation");
    }

    #[actix_web::test]
    async fn test_search_by_isbn() {
        let (repo, _) = repo();
        repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        repo.add(book("Foundation", Genre::new(2, "Classics"), vec![herbert()])).await.unwrap();

        let found = repo.search("isbn", "ISBN-FOUND").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].isbn, "isbn-Foundation");
        assert!(repo.search("isbn", "978").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_search_rejects_unknown_field_and_blank_keyword() {
        let (repo, _) = repo();

        assert!(matches!(
            repo.search("publisher", "x").await,
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.search("title", "   ").await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[actix_web::test]
    async fn test_search_keyword_is_literal() {
        let (repo, _) = repo();
        repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();

        assert!(repo.search("title", ".*").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_all_genres_and_authors_are_deduplicated() {
        let (repo, _) = repo();
        let asimov = Author::new("Isaac Asimov", date(1920, 1, 2), Some("u3".to_string()));
        repo.add(book("Dune", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        repo.add(book("Dune Messiah", Genre::new(1, "SciFi"), vec![herbert()])).await.unwrap();
        repo.add(book("Foundation", Genre::new(2, "Classics"), vec![asimov.clone(), herbert()])).await.unwrap();

        let genres = repo.all_genres().await.unwrap();
        assert_eq!(genres, vec![Genre::new(1, "SciFi"), Genre::new(2, "Classics")]);

        let authors = repo.all_authors_across_books().await.unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0], herbert());
        assert_eq!(authors[1], Author::new("Isaac Asimov", date(1920, 1, 2), None));
    }

    #[actix_web::test]
    async fn test_malformed_document_surfaces_error() {
        let (repo, store) = repo();
        let id = store
            .insert(mongodb::bson::doc! { "isbn": "1", "genre": { "id": 1, "name": "SciFi" } })
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(
            repo.get_by_id(&id.to_hex()).await,
            Err(AppError::MalformedRecordError(_))
        ));
        assert!(matches!(repo.get_all().await, Err(AppError::MalformedRecordError(_))));
    }
}
