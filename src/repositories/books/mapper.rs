//! # Book Document Mapper
//!
//! [`Book`] 애그리거트와 MongoDB 문서 사이의 변환을 담당합니다.
//! I/O를 하지 않으며, 배열 요소의 순서를 그대로 보존합니다.
//!
//! ## 저장 형태
//!
//! ```text
//! {
//!   _id: ObjectId,
//!   title: "Dune", isbn: "123",
//!   genre:   { id: 1, name: "SciFi" },
//!   authors: [ { name, birthdate: "YYYY-MM-DD", user_id? } ],
//!   reviews: [ { user_id, review_text, review_date: "YYYY-MM-DD", username } ],
//!   ratings: [ { user_id, rating } ],
//!   user_id?
//! }
//! ```
//!
//! 스키마리스 저장소에서 읽은 문서는 여기서 필드 단위로 검증됩니다.
//! 필수 스칼라가 없거나, 날짜를 해석할 수 없거나, 평점이 범위를 벗어나면
//! `MalformedRecordError`가 반환되어 타입 없는 맵이 코어로 흘러들지 않습니다.
//! `authors`/`reviews`/`ratings` 배열이 없으면 빈 배열로 간주합니다.

use chrono::NaiveDate;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::books::{Author, Book, Genre, Rating, Review};

/// 문서 필드 이름
pub mod fields {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const ISBN: &str = "isbn";
    pub const GENRE: &str = "genre";
    pub const GENRE_ID: &str = "id";
    pub const GENRE_NAME: &str = "name";
    pub const AUTHORS: &str = "authors";
    pub const AUTHOR_NAME: &str = "name";
    pub const AUTHOR_BIRTHDATE: &str = "birthdate";
    pub const REVIEWS: &str = "reviews";
    pub const REVIEW_TEXT: &str = "review_text";
    pub const REVIEW_DATE: &str = "review_date";
    pub const REVIEW_USERNAME: &str = "username";
    pub const RATINGS: &str = "ratings";
    pub const RATING_VALUE: &str = "rating";
    /// 도서 소유자, 리뷰/평점 작성자, 저자 연결 사용자에 공통으로 쓰이는 필드
    pub const USER_ID: &str = "user_id";
}

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn genre_to_document(genre: &Genre) -> Document {
    doc! {
        fields::GENRE_ID: genre.id,
        fields::GENRE_NAME: genre.name.as_str(),
    }
}

pub fn author_to_document(author: &Author) -> Document {
    let mut document = doc! {
        fields::AUTHOR_NAME: author.name.as_str(),
        fields::AUTHOR_BIRTHDATE: format_date(author.birthdate),
    };
    if let Some(user_id) = &author.linked_user_id {
        document.insert(fields::USER_ID, user_id.as_str());
    }
    document
}

pub fn review_to_document(review: &Review) -> Document {
    doc! {
        fields::USER_ID: review.author_user_id.as_str(),
        fields::REVIEW_TEXT: review.text.as_str(),
        fields::REVIEW_DATE: format_date(review.date),
        fields::REVIEW_USERNAME: review.author_username.as_str(),
    }
}

pub fn rating_to_document(rating: &Rating) -> Document {
    doc! {
        fields::USER_ID: rating.author_user_id.as_str(),
        fields::RATING_VALUE: rating.value,
    }
}

/// 도서를 문서로 변환합니다. `_id`는 저장소가 부여하므로 포함하지 않습니다.
pub fn to_document(book: &Book) -> Document {
    let authors: Vec<Bson> = book.authors.iter().map(|a| Bson::Document(author_to_document(a))).collect();
    let reviews: Vec<Bson> = book.reviews.iter().map(|r| Bson::Document(review_to_document(r))).collect();
    let ratings: Vec<Bson> = book.ratings.iter().map(|r| Bson::Document(rating_to_document(r))).collect();

    let mut document = doc! {
        fields::TITLE: book.title.as_str(),
        fields::ISBN: book.isbn.as_str(),
        fields::GENRE: genre_to_document(&book.genre),
        fields::AUTHORS: authors,
        fields::REVIEWS: reviews,
        fields::RATINGS: ratings,
    };

    match &book.owner_user_id {
        Some(owner) => document.insert(fields::USER_ID, owner.as_str()),
        None => document.insert(fields::USER_ID, Bson::Null),
    };

    document
}

/// 문서를 도서로 변환합니다.
///
/// # Errors
///
/// * `MalformedRecordError` - `_id`, `title`, `isbn`, `genre`가 없거나 타입이 다름,
///   날짜 해석 실패, 범위를 벗어난 평점
pub fn from_document(document: &Document) -> AppResult<Book> {
    let id = match document.get(fields::ID) {
        Some(Bson::ObjectId(id)) => *id,
        _ => return Err(malformed("도서 문서에 _id가 없습니다")),
    };
    let context = id.to_hex();

    let title = required_str(document, fields::TITLE, &context)?;
    let isbn = required_str(document, fields::ISBN, &context)?;

    let genre_doc = document
        .get_document(fields::GENRE)
        .map_err(|_| malformed(format!("도서 {}: genre 필드가 없습니다", context)))?;
    let genre = genre_from_document(genre_doc, &context)?;

    let authors = array_of_documents(document, fields::AUTHORS, &context)?
        .into_iter()
        .map(|d| author_from_document(d, &context))
        .collect::<AppResult<Vec<_>>>()?;
    let reviews = array_of_documents(document, fields::REVIEWS, &context)?
        .into_iter()
        .map(|d| review_from_document(d, &context))
        .collect::<AppResult<Vec<_>>>()?;
    let ratings = array_of_documents(document, fields::RATINGS, &context)?
        .into_iter()
        .map(|d| rating_from_document(d, &context))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Book {
        id: Some(id),
        title,
        isbn,
        genre,
        authors,
        reviews,
        ratings,
        owner_user_id: optional_str(document, fields::USER_ID),
    })
}

/// 문서의 `_id`를 꺼냅니다.
pub fn document_id(document: &Document) -> Option<ObjectId> {
    document.get_object_id(fields::ID).ok()
}

pub fn genre_from_document(document: &Document, context: &str) -> AppResult<Genre> {
    Ok(Genre {
        id: required_i32(document, fields::GENRE_ID, context)?,
        name: required_str(document, fields::GENRE_NAME, context)?,
    })
}

pub fn author_from_document(document: &Document, context: &str) -> AppResult<Author> {
    Ok(Author {
        name: required_str(document, fields::AUTHOR_NAME, context)?,
        birthdate: required_date(document, fields::AUTHOR_BIRTHDATE, context)?,
        linked_user_id: optional_str(document, fields::USER_ID),
    })
}

pub fn review_from_document(document: &Document, context: &str) -> AppResult<Review> {
    Ok(Review {
        author_user_id: required_str(document, fields::USER_ID, context)?,
        text: required_str(document, fields::REVIEW_TEXT, context)?,
        date: required_date(document, fields::REVIEW_DATE, context)?,
        author_username: optional_str(document, fields::REVIEW_USERNAME).unwrap_or_default(),
    })
}

pub fn rating_from_document(document: &Document, context: &str) -> AppResult<Rating> {
    let author_user_id = required_str(document, fields::USER_ID, context)?;
    let value = required_i32(document, fields::RATING_VALUE, context)?;

    Rating::new(author_user_id, value)
        .map_err(|_| malformed(format!("도서 {}: 저장된 평점 {}이 허용 범위를 벗어났습니다", context, value)))
}

fn malformed(message: impl Into<String>) -> AppError {
    AppError::MalformedRecordError(message.into())
}

fn required_str(document: &Document, key: &str, context: &str) -> AppResult<String> {
    document
        .get_str(key)
        .map(str::to_string)
        .map_err(|_| malformed(format!("도서 {}: 문자열 필드 '{}'가 없습니다", context, key)))
}

fn optional_str(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn required_i32(document: &Document, key: &str, context: &str) -> AppResult<i32> {
    match document.get(key) {
        Some(Bson::Int32(value)) => Ok(*value),
        Some(Bson::Int64(value)) => i32::try_from(*value)
            .map_err(|_| malformed(format!("도서 {}: 정수 필드 '{}'가 범위를 벗어났습니다", context, key))),
        Some(Bson::Double(value)) if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) => {
            Ok(*value as i32)
        }
        _ => Err(malformed(format!("도서 {}: 정수 필드 '{}'가 없습니다", context, key))),
    }
}

fn required_date(document: &Document, key: &str, context: &str) -> AppResult<NaiveDate> {
    let raw = required_str(document, key, context)?;
    parse_date(&raw).ok_or_else(|| {
        malformed(format!("도서 {}: '{}' 값 '{}'을 날짜로 해석할 수 없습니다", context, key, raw))
    })
}

fn array_of_documents<'a>(document: &'a Document, key: &str, context: &str) -> AppResult<Vec<&'a Document>> {
    match document.get(key) {
        None | Some(Bson::Null) => Ok(Vec::new()),
        Some(Bson::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_document()
                    .ok_or_else(|| malformed(format!("도서 {}: '{}' 배열에 문서가 아닌 요소가 있습니다", context, key)))
            })
            .collect(),
        Some(_) => Err(malformed(format!("도서 {}: '{}' 필드가 배열이 아닙니다", context, key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_book() -> Book {
        let mut book = Book::new(
            "Dune",
            "123",
            Genre::new(1, "SciFi"),
            vec![
                Author::new("Herbert", date(1920, 1, 1), None),
                Author::new("Anderson", date(1962, 8, 13), Some("u9".to_string())),
            ],
            Some("owner".to_string()),
        );
        book.reviews = vec![Review::new("u1", "Spice!", date(2024, 3, 2), "alice").unwrap()];
        book.ratings = vec![Rating::new("u1", 5).unwrap(), Rating::new("u2", 3).unwrap()];
        book
    }

    fn stored(book: &Book) -> (ObjectId, Document) {
        let id = ObjectId::new();
        let mut document = to_document(book);
        document.insert(fields::ID, id);
        (id, document)
    }

    #[test]
    fn test_to_document_omits_id_and_embeds_collections() {
        let mut book = sample_book();
        book.id = Some(ObjectId::new());
        let document = to_document(&book);

        assert!(!document.contains_key(fields::ID));
        assert_eq!(document.get_str(fields::TITLE).unwrap(), "Dune");
        assert_eq!(
            document.get_document(fields::GENRE).unwrap().get_str(fields::GENRE_NAME).unwrap(),
            "SciFi"
        );
        assert_eq!(document.get_array(fields::AUTHORS).unwrap().len(), 2);
        assert_eq!(document.get_array(fields::REVIEWS).unwrap().len(), 1);
        assert_eq!(document.get_array(fields::RATINGS).unwrap().len(), 2);
        assert_eq!(document.get_str(fields::USER_ID).unwrap(), "owner");
    }

    #[test]
    fn test_from_document_restores_aggregate_in_order() {
        let book = sample_book();
        let (id, document) = stored(&book);

        let restored = from_document(&document).unwrap();

        assert_eq!(restored.id, Some(id));
        assert_eq!(restored.title, book.title);
        assert_eq!(restored.genre, book.genre);
        assert_eq!(restored.authors, book.authors);
        assert_eq!(restored.reviews, book.reviews);
        assert_eq!(restored.ratings, book.ratings);
        assert_eq!(restored.owner_user_id.as_deref(), Some("owner"));
    }

    #[test]
    fn test_missing_arrays_are_treated_as_empty() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "title": "Foundation",
            "isbn": "456",
            "genre": { "id": 1, "name": "SciFi" },
        };

        let book = from_document(&document).unwrap();
        assert!(book.authors.is_empty());
        assert!(book.reviews.is_empty());
        assert!(book.ratings.is_empty());
        assert_eq!(book.owner_user_id, None);
    }

    #[test]
    fn test_missing_required_fields_are_malformed() {
        let without_id = doc! { "title": "A", "isbn": "1", "genre": { "id": 1, "name": "X" } };
        let without_title = doc! { "_id": ObjectId::new(), "isbn": "1", "genre": { "id": 1, "name": "X" } };
        let without_isbn = doc! { "_id": ObjectId::new(), "title": "A", "genre": { "id": 1, "name": "X" } };

        for document in [without_id, without_title, without_isbn] {
            assert!(matches!(
                from_document(&document),
                Err(AppError::MalformedRecordError(_))
            ));
        }
    }

    #[test]
    fn test_unparsable_review_date_is_malformed() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Dune",
            "isbn": "123",
            "genre": { "id": 1, "name": "SciFi" },
            "reviews": [ { "user_id": "u1", "review_text": "ok", "review_date": "yesterday", "username": "a" } ],
        };

        assert!(matches!(
            from_document(&document),
            Err(AppError::MalformedRecordError(_))
        ));
    }

    #[test]
    fn test_out_of_range_stored_rating_is_malformed() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Dune",
            "isbn": "123",
            "genre": { "id": 1, "name": "SciFi" },
            "ratings": [ { "user_id": "u1", "rating": 9 } ],
        };

        assert!(matches!(
            from_document(&document),
            Err(AppError::MalformedRecordError(_))
        ));
    }

    #[test]
    fn test_int64_rating_and_null_author_user_are_accepted() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Dune",
            "isbn": "123",
            "genre": { "id": 1_i64, "name": "SciFi" },
            "authors": [ { "name": "Herbert", "birthdate": "1920-01-01", "user_id": Bson::Null } ],
            "ratings": [ { "user_id": "u1", "rating": 4_i64 } ],
        };

        let book = from_document(&document).unwrap();
        assert_eq!(book.genre.id, 1);
        assert_eq!(book.authors[0].linked_user_id, None);
        assert_eq!(book.ratings[0].value, 4);
    }
}
