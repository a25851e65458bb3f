//! Book Aggregate
//!
//! 도서 애그리거트와 그 안에 내장되는 값 객체들입니다.
//! 저자, 리뷰, 평점은 별도 컬렉션이 아니라 도서 문서 안의 배열로 저장되며,
//! 도서와 함께 하나의 단위로 저장/조회됩니다.

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};

/// 허용되는 최소 평점
pub const MIN_RATING: i32 = 1;
/// 허용되는 최대 평점
pub const MAX_RATING: i32 = 5;

/// 장르 값 객체
///
/// 별도 컬렉션이 없으므로 같은 `(id, name)` 장르가 여러 도서에 중복 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// 저자 값 객체
///
/// 한 도서 안에서 저자의 동일성은 `(name, birthdate)` 쌍으로 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub birthdate: NaiveDate,
    /// 저자가 시스템 사용자와 연결된 경우의 사용자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_user_id: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>, birthdate: NaiveDate, linked_user_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            birthdate,
            linked_user_id,
        }
    }

    /// 중복 제거에 쓰이는 동일성 키
    pub fn identity(&self) -> (&str, NaiveDate) {
        (self.name.as_str(), self.birthdate)
    }
}

/// 리뷰 값 객체 (도서당 사용자별 최대 1개)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author_user_id: String,
    pub text: String,
    pub date: NaiveDate,
    /// 리뷰 작성 시점의 사용자명 스냅샷
    pub author_username: String,
}

impl Review {
    pub fn new(
        author_user_id: impl Into<String>,
        text: impl Into<String>,
        date: NaiveDate,
        author_username: impl Into<String>,
    ) -> AppResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::ValidationError("리뷰 내용은 비어 있을 수 없습니다".to_string()));
        }

        Ok(Self {
            author_user_id: author_user_id.into(),
            text,
            date,
            author_username: author_username.into(),
        })
    }
}

/// 평점 값 객체 (도서당 사용자별 최대 1개, 1-5)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub author_user_id: String,
    pub value: i32,
}

impl Rating {
    pub fn new(author_user_id: impl Into<String>, value: i32) -> AppResult<Self> {
        Self::check_value(value)?;
        Ok(Self {
            author_user_id: author_user_id.into(),
            value,
        })
    }

    /// 평점 값이 허용 범위 안에 있는지 확인합니다.
    pub fn check_value(value: i32) -> AppResult<()> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(())
        } else {
            Err(AppError::ValidationError(format!(
                "평점은 {}에서 {} 사이여야 합니다 (입력값: {})",
                MIN_RATING, MAX_RATING, value
            )))
        }
    }
}

/// 도서 애그리거트
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// 저장소가 삽입 시 부여하는 식별자 (저장 전에는 None)
    pub id: Option<ObjectId>,
    pub title: String,
    pub isbn: String,
    pub genre: Genre,
    pub authors: Vec<Author>,
    pub reviews: Vec<Review>,
    pub ratings: Vec<Rating>,
    /// 도서를 등록한 사용자 ID
    pub owner_user_id: Option<String>,
}

impl Book {
    /// 아직 저장되지 않은 새 도서를 만듭니다. 리뷰와 평점은 비어 있습니다.
    pub fn new(
        title: impl Into<String>,
        isbn: impl Into<String>,
        genre: Genre,
        authors: Vec<Author>,
        owner_user_id: Option<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            isbn: isbn.into(),
            genre,
            authors,
            reviews: Vec::new(),
            ratings: Vec::new(),
            owner_user_id,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 평점 산술 평균. 평점이 없으면 0.0
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }

        let sum: i64 = self.ratings.iter().map(|r| i64::from(r.value)).sum();
        sum as f64 / self.ratings.len() as f64
    }

    pub fn rating_by(&self, user_id: &str) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.author_user_id == user_id)
    }

    pub fn review_by(&self, user_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.author_user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new(
            "Dune",
            "123",
            Genre::new(1, "SciFi"),
            vec![Author::new(
                "Herbert",
                NaiveDate::from_ymd_opt(1920, 1, 1).unwrap(),
                None,
            )],
            None,
        )
    }

    #[test]
    fn test_average_rating_without_ratings_is_zero() {
        let book = dune();
        assert_eq!(book.average_rating(), 0.0);
    }

    #[test]
    fn test_average_rating_is_arithmetic_mean() {
        let mut book = dune();
        book.ratings = vec![
            Rating::new("u1", 5).unwrap(),
            Rating::new("u2", 3).unwrap(),
            Rating::new("u3", 4).unwrap(),
        ];
        assert_eq!(book.average_rating(), 4.0);
    }

    #[test]
    fn test_rating_range_is_enforced() {
        assert!(Rating::new("u1", 1).is_ok());
        assert!(Rating::new("u1", 5).is_ok());
        assert!(matches!(Rating::new("u1", 0), Err(AppError::ValidationError(_))));
        assert!(matches!(Rating::new("u1", 6), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_review_text_must_not_be_blank() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(Review::new("u1", "Great", date, "alice").is_ok());
        assert!(matches!(
            Review::new("u1", "   ", date, "alice"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_new_book_has_no_id_and_empty_collections() {
        let book = dune();
        assert!(book.id.is_none());
        assert!(book.reviews.is_empty());
        assert!(book.ratings.is_empty());
        assert_eq!(book.authors.len(), 1);
    }
}
