//! 도서 관련 요청 DTO
//!
//! 날짜는 `YYYY-MM-DD` 문자열로 주고받으며, 형식이 틀리면 JSON 역직렬화 단계에서 400이 됩니다.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::books::{Author, Genre};
use crate::utils::string_utils::deserialize_optional_string;

/// 장르 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenreRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "장르 이름을 입력해주세요"))]
    pub name: String,
}

impl From<GenreRequest> for Genre {
    fn from(request: GenreRequest) -> Self {
        Genre::new(request.id, request.name.trim())
    }
}

/// 저자 요청 구조체 (도서 등록, 저자 추가에 공통 사용)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthorRequest {
    #[validate(length(min = 1, message = "저자 이름을 입력해주세요"))]
    pub name: String,

    pub birthdate: NaiveDate,

    /// 저자와 연결할 사용자 ID (선택, 빈 문자열은 없음으로 처리)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub linked_user_id: Option<String>,
}

impl From<AuthorRequest> for Author {
    fn from(request: AuthorRequest) -> Self {
        Author::new(request.name.trim(), request.birthdate, request.linked_user_id)
    }
}

/// 도서 등록 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddBookRequest {
    #[validate(length(min = 1, message = "제목을 입력해주세요"))]
    pub title: String,

    #[validate(length(min = 1, message = "ISBN을 입력해주세요"))]
    pub isbn: String,

    #[validate(nested)]
    pub genre: GenreRequest,

    #[validate(length(min = 1, message = "저자를 한 명 이상 입력해주세요"), nested)]
    pub authors: Vec<AuthorRequest>,
}

/// 평점 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddRatingRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1에서 5 사이여야 합니다"))]
    pub rating: i32,
}

/// 리뷰 요청 구조체
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddReviewRequest {
    #[validate(length(min = 1, message = "리뷰 내용을 입력해주세요"))]
    pub text: String,
}

/// 검색 쿼리 파라미터
///
/// 필드 이름과 키워드는 서비스 계층에서 검증합니다 (`InvalidArgument`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub field: String,

    #[serde(default)]
    pub keyword: String,
}

/// 제목 조회 쿼리 파라미터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: String,
}
