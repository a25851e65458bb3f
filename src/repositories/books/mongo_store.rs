//! # MongoDB Book Store
//!
//! `books` 컬렉션에 대한 [`BookStore`] 구현입니다.
//!
//! ## 쿼리 형태
//!
//! | 연산 | MongoDB |
//! |------|---------|
//! | 키워드 검색 | `{ <field>: { $regex: <escaped>, $options: "i" } }` |
//! | 저자 검색 | `{ authors: { $elemMatch: { name: { $regex, $options: "i" } } } }` |
//! | 요소 갱신 | `update_one({ _id, <array>: { $elemMatch: key } }, { $set: { "<array>.$.<f>": v } })` |
//! | 요소 추가 | `update_one({ _id }, { $push: { <array>: element } })` |
//!
//! 한 번의 `update_one`은 한 문서에 대해 원자적이므로, 요소 갱신과 추가는
//! 각각 원자적으로 수행됩니다. 두 연산을 묶는 것은 업서트 엔진의 몫입니다.

use async_trait::async_trait;
use futures_util::StreamExt;
use log::info;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use super::mapper::fields;
use super::store::{BookFilter, BookStore, ElementKey, SearchField, WriteCounts};
use crate::core::errors::{AppError, AppResult};

/// 도서 컬렉션 이름
pub const BOOKS_COLLECTION: &str = "books";

#[derive(Clone)]
pub struct MongoBookStore {
    collection: Collection<Document>,
}

impl MongoBookStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// 검색에 쓰이는 필드의 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let title_index = IndexModel::builder()
            .keys(doc! { fields::TITLE: 1 })
            .options(IndexOptions::builder().name("title_asc".to_string()).build())
            .build();

        let isbn_index = IndexModel::builder()
            .keys(doc! { fields::ISBN: 1 })
            .options(IndexOptions::builder().name("isbn_asc".to_string()).build())
            .build();

        let author_index = IndexModel::builder()
            .keys(doc! { "authors.name": 1 })
            .options(IndexOptions::builder().name("authors_name_asc".to_string()).build())
            .build();

        self.collection
            .create_indexes([title_index, isbn_index, author_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ books 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

/// 정규식 메타 문자를 이스케이프하여 키워드를 리터럴 부분 문자열로 취급합니다.
pub fn escape_regex(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 검색 조건을 MongoDB 필터로 변환합니다.
pub fn filter_document(filter: &BookFilter) -> Document {
    match filter {
        BookFilter::All => doc! {},
        BookFilter::Keyword { field, keyword } => {
            let pattern = doc! { "$regex": escape_regex(keyword), "$options": "i" };
            match field {
                SearchField::Title => doc! { fields::TITLE: pattern },
                SearchField::Isbn => doc! { fields::ISBN: pattern },
                SearchField::Genre => doc! { "genre.name": pattern },
                SearchField::Author => doc! {
                    fields::AUTHORS: { "$elemMatch": { fields::AUTHOR_NAME: pattern } }
                },
            }
        }
    }
}

fn element_filter(id: &ObjectId, array_field: &str, key: &ElementKey) -> Document {
    let mut matcher = Document::new();
    for (name, value) in key {
        matcher.insert(*name, value.clone());
    }

    let mut filter = doc! { fields::ID: *id };
    filter.insert(array_field, doc! { "$elemMatch": matcher });
    filter
}

fn positional_set(array_field: &str, fields: Document) -> Document {
    let mut set = Document::new();
    for (name, value) in fields {
        set.insert(format!("{}.$.{}", array_field, name), value);
    }
    doc! { "$set": set }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, filter: BookFilter) -> AppResult<Vec<Document>> {
        let mut cursor = self
            .collection
            .find(filter_document(&filter))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.next().await {
            documents.push(document.map_err(|e| AppError::DatabaseError(e.to_string()))?);
        }

        Ok(documents)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Document>> {
        self.collection
            .find_one(doc! { fields::ID: *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, document: Document) -> AppResult<Option<ObjectId>> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.inserted_id.as_object_id())
    }

    async fn replace_fields(&self, id: &ObjectId, fields: Document) -> AppResult<WriteCounts> {
        let result = self
            .collection
            .update_one(doc! { fields::ID: *id }, doc! { "$set": fields })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(WriteCounts::new(result.matched_count, result.modified_count))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection
            .delete_one(doc! { fields::ID: *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn set_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        key: &ElementKey,
        fields: Document,
    ) -> AppResult<WriteCounts> {
        let result = self
            .collection
            .update_one(element_filter(id, array_field, key), positional_set(array_field, fields))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(WriteCounts::new(result.matched_count, result.modified_count))
    }

    async fn push_array_element(
        &self,
        id: &ObjectId,
        array_field: &str,
        element: Document,
    ) -> AppResult<WriteCounts> {
        let mut null_field = doc! { fields::ID: *id };
        null_field.insert(array_field, Bson::Null);
        let mut empty_array = Document::new();
        empty_array.insert(array_field, Bson::Array(Vec::new()));
        self.collection
            .update_one(null_field, doc! { "$set": empty_array })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut push = Document::new();
        push.insert(array_field, Bson::Document(element));

        let result = self
            .collection
            .update_one(doc! { fields::ID: *id }, doc! { "$push": push })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(WriteCounts::new(result.matched_count, result.modified_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_regex_neutralizes_metacharacters() {
        assert_eq!(escape_regex("Dune"), "Dune");
        assert_eq!(escape_regex("C++ (2nd ed.)"), "C\\+\\+ \\(2nd ed\\.\\)");
        assert_eq!(escape_regex(".*"), "\\.\\*");
    }

    #[test]
    fn test_filter_document_shapes() {
        assert_eq!(filter_document(&BookFilter::All), doc! {});

        let title = filter_document(&BookFilter::Keyword {
            field: SearchField::Title,
            keyword: "dune".to_string(),
        });
        assert_eq!(title, doc! { "title": { "$regex": "dune", "$options": "i" } });

        let genre = filter_document(&BookFilter::Keyword {
            field: SearchField::Genre,
            keyword: "sci".to_string(),
        });
        assert_eq!(genre, doc! { "genre.name": { "$regex": "sci", "$options": "i" } });

        let author = filter_document(&BookFilter::Keyword {
            field: SearchField::Author,
            keyword: "herbert".to_string(),
        });
        assert_eq!(
            author,
            doc! { "authors": { "$elemMatch": { "name": { "$regex": "herbert", "$options": "i" } } } }
        );
    }

    #[test]
    fn test_positional_update_documents() {
        let id = ObjectId::new();
        let key = [("user_id", Bson::String("u1".to_string()))];

        assert_eq!(
            element_filter(&id, "ratings", &key),
            doc! { "_id": id, "ratings": { "$elemMatch": { "user_id": "u1" } } }
        );
        assert_eq!(
            positional_set("ratings", doc! { "rating": 4 }),
            doc! { "$set": { "ratings.$.rating": 4 } }
        );
    }
}
