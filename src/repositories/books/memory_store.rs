//! In-memory book store.
//!
//! [`BookStore`]의 프로세스 내 구현입니다. 테스트와 `STORAGE_BACKEND=memory`
//! 실행에서 사용하며, 문서를 삽입 순서대로 보관합니다.
//!
//! - 영속성이 없으므로 프로세스가 끝나면 모든 데이터가 사라집니다.
//! - 검색은 MongoDB 구현과 같은 대소문자 무시 부분 일치입니다.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::mapper::fields;
use super::store::{BookFilter, BookStore, ElementKey, SearchField, WriteCounts};
use crate::core::errors::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    documents: RwLock<Vec<Document>>,
}

fn poison_err<T>(_: PoisonError<T>) -> AppError {
    AppError::InternalError("in-memory book store lock poisoned".to_string())
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 문서 수
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get(fields::ID), Some(Bson::ObjectId(existing)) if existing == id)
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_keyword(document: &Document, field: SearchField, needle_lower: &str) -> bool {
    match field {
        SearchField::Title => document
            .get_str(fields::TITLE)
            .is_ok_and(|v| contains_ignore_case(v, needle_lower)),
        SearchField::Isbn => document
            .get_str(fields::ISBN)
            .is_ok_and(|v| contains_ignore_case(v, needle_lower)),
        SearchField::Genre => document
            .get_document(fields::GENRE)
            .and_then(|g| g.get_str(fields::GENRE_NAME))
            .is_ok_and(|v| contains_ignore_case(v, needle_lower)),
        SearchField::Author => document.get_array(fields::AUTHORS).is_ok_and(|authors| {
            authors.iter().any(|author| {
                author
                    .as_document()
                    .and_then(|a| a.get_str(fields::AUTHOR_NAME).ok())
                    .is_some_and(|name| contains_ignore_case(name, needle_lower))
            })
        }),
    }
}

fn element_matches(element: &Bson, key: &ElementKey) -> bool {
    match element.as_document() {
        Some(document) => key
            .iter()
            .all(|(name, value)| document.get(*name) == Some(value)),
        None => false,
    }
}

/// 필드를 덮어쓰고 실제로 값이 바뀌었는지 반환합니다.
fn apply_set(target: &mut Document, fields: Document) -> bool {
    let mut changed = false;
    for (name, value) in fields {
        if target.get(&name) != Some(&value) {
            target.insert(name, value);
            changed = true;
        }
    }
    changed
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find(&self, filter: BookFilter) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().map_err(poison_err)?;

        let found = match filter {
            BookFilter::All => documents.clone(),
            BookFilter::Keyword { field, keyword } => {
                let needle = keyword.to_lowercase();
                documents
                    .iter()
                    .filter(|d| matches_keyword(d, field, &needle))
                    .cloned()
                    .collect()
            }
        };

        Ok(found)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Document>> {
        let documents = self.documents.read().map_err(poison_err)?;
        Ok(documents.iter().find(|d| has_id(d, id)).cloned())
    }

    async fn insert(&self, mut document: Document) -> AppResult<Option<ObjectId>> {
        let id = match document.get(fields::ID) {
            Some(Bson::ObjectId(id)) => *id,
            _ => {
                let id = ObjectId::new();
                document.insert(fields::ID, id);
                id
            }
        };

        let mut documents = self.documents.write().map_err(poison_err)?;
        if documents.iter().any(|d| has_id(d, &id)) {
            return Err(AppError::DatabaseError(format!("duplicate _id {}", id.to_hex())));
        }
        documents.push(document);

        Ok(Some(id))
    }

    async fn replace_fields(&self, id: &ObjectId, fields: Document) -> AppResult<WriteCounts> {
        let mut documents = self.documents.write().map_err(poison_err)?;

        match documents.iter_mut().find(|d| has_id(d, id)) {
            Some(document) => {
                let changed = apply_set(document, fields);
                Ok(WriteCounts::new(1, u64::from(changed)))
            }
            None => Ok(WriteCounts::default()),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<u64> {
        let mut documents = self.documents.write().map_err(poison_err)?;
        let before = documents.len();
        documents.retain(|d| !has_id(d, id));
        Ok((before - documents.len()) as u64)
    }

    async fn set_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        key: &ElementKey,
        fields: Document,
    ) -> AppResult<WriteCounts> {
        let mut documents = self.documents.write().map_err(poison_err)?;

        let Some(document) = documents.iter_mut().find(|d| has_id(d, id)) else {
            return Ok(WriteCounts::default());
        };
        let Ok(items) = document.get_array_mut(array_field) else {
            return Ok(WriteCounts::default());
        };
        let Some(element) = items.iter_mut().find(|item| element_matches(item, key)) else {
            return Ok(WriteCounts::default());
        };

        match element.as_document_mut() {
            Some(element) => {
                let changed = apply_set(element, fields);
                Ok(WriteCounts::new(1, u64::from(changed)))
            }
            None => Ok(WriteCounts::default()),
        }
    }

    async fn push_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        element: Document,
    ) -> AppResult<WriteCounts> {
        let mut documents = self.documents.write().map_err(poison_err)?;

        let Some(document) = documents.iter_mut().find(|d| has_id(d, id)) else {
            return Ok(WriteCounts::default());
        };

        match document.get_mut(array_field) {
            Some(Bson::Array(items)) => items.push(Bson::Document(element)),
            None | Some(Bson::Null) => {
                document.insert(array_field, vec![Bson::Document(element)]);
            }
            Some(_) => {
                return Err(AppError::DatabaseError(format!(
                    "field '{}' is not an array",
                    array_field
                )));
            }
        }

        Ok(WriteCounts::new(1, 1))
    }
}
