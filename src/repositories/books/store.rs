//! # Book Store Abstraction
//!
//! `books` 컬렉션에 대한 저수준 문서 연산을 추상화합니다.
//! 리포지토리와 업서트 엔진은 이 트레이트만 바라보므로, MongoDB 없이도
//! [`InMemoryBookStore`](super::memory_store::InMemoryBookStore)로 동일한 의미를 검증할 수 있습니다.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::core::errors::{AppError, AppResult};

/// 검색 가능한 도서 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Isbn,
    Genre,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Isbn => "isbn",
            SearchField::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = AppError;

    /// 대소문자를 구분하지 않고 필드 이름을 해석합니다.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "isbn" => Ok(SearchField::Isbn),
            "genre" => Ok(SearchField::Genre),
            other => Err(AppError::InvalidArgument(format!(
                "검색할 수 없는 필드입니다: '{}' (title, author, isbn, genre 중 하나)",
                other
            ))),
        }
    }
}

/// 도서 조회 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    /// 대소문자 무시 부분 일치
    Keyword { field: SearchField, keyword: String },
}

/// 쓰기 연산 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub matched: u64,
    pub modified: u64,
}

impl WriteCounts {
    pub fn new(matched: u64, modified: u64) -> Self {
        Self { matched, modified }
    }
}

/// 배열 요소를 찾는 키. `(필드 이름, 값)` 쌍이 모두 일치해야 합니다.
pub type ElementKey = [(&'static str, Bson)];

/// 도서 문서 저장소
///
/// 구현체는 한 문서에 대한 단일 연산을 원자적으로 수행해야 합니다.
/// 여러 연산을 묶는 원자성은 요구하지 않습니다.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 조건에 맞는 문서를 저장 순서대로 반환합니다.
    async fn find(&self, filter: BookFilter) -> AppResult<Vec<Document>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Document>>;

    /// 문서를 삽입하고 저장소가 부여한 ID를 반환합니다.
    /// 저장소가 ID를 돌려주지 않으면 `None`입니다.
    async fn insert(&self, document: Document) -> AppResult<Option<ObjectId>>;

    /// 최상위 필드를 덮어씁니다 (`$set`).
    async fn replace_fields(&self, id: &ObjectId, fields: Document) -> AppResult<WriteCounts>;

    /// 삭제된 문서 수를 반환합니다.
    async fn delete(&self, id: &ObjectId) -> AppResult<u64>;

    /// `array_field` 배열에서 `key`와 일치하는 첫 요소의 필드를 갱신합니다.
    /// 일치하는 요소가 없으면 `matched == 0`입니다.
    async fn set_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        key: &ElementKey,
        fields: Document,
    ) -> AppResult<WriteCounts>;

    /// `array_field` 배열 끝에 요소를 추가합니다. 배열이 없으면 새로 만듭니다.
    async fn push_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        element: Document,
    ) -> AppResult<WriteCounts>;
}
