use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::books::{Author, Book, Genre, Rating, Review};
use crate::repositories::books::UpsertOutcome;

/// 장르 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self { id: genre.id, name: genre.name }
    }
}

/// 저자 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub name: String,
    pub birthdate: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_user_id: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            birthdate: author.birthdate,
            linked_user_id: author.linked_user_id,
        }
    }
}

/// 리뷰 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub user_id: String,
    pub username: String,
    pub text: String,
    pub date: NaiveDate,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            user_id: review.author_user_id,
            username: review.author_username,
            text: review.text,
            date: review.date,
        }
    }
}

/// 평점 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub user_id: String,
    pub rating: i32,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self { user_id: rating.author_user_id, rating: rating.value }
    }
}

/// 도서 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub isbn: String,
    pub genre: GenreResponse,
    pub authors: Vec<AuthorResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub ratings: Vec<RatingResponse>,
    pub average_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<String>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let average_rating = book.average_rating();
        Self {
            id: book.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: book.title,
            isbn: book.isbn,
            genre: book.genre.into(),
            authors: book.authors.into_iter().map(Into::into).collect(),
            reviews: book.reviews.into_iter().map(Into::into).collect(),
            ratings: book.ratings.into_iter().map(Into::into).collect(),
            average_rating,
            owner_user_id: book.owner_user_id,
        }
    }
}

/// 평균 평점 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageRatingResponse {
    pub book_id: String,
    pub average_rating: f64,
}

/// 리뷰/평점/저자 업서트 결과 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResponse {
    pub book_id: String,
    /// `inserted` 또는 `updated`
    pub result: String,
}

impl UpsertResponse {
    pub fn new(book_id: impl Into<String>, outcome: UpsertOutcome) -> Self {
        let result = match outcome {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
        };
        Self { book_id: book_id.into(), result: result.to_string() }
    }
}
