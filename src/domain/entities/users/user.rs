//! User Entity Implementation
//!
//! 카탈로그 사용자 엔티티입니다. 리뷰/평점 작성자 식별과 로그인에만 사용되며,
//! `users` 컬렉션의 문서와 serde로 직접 매핑됩니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이름 (unique)
    pub username: String,
    /// SHA-256 16진수 다이제스트
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            password_hash,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_unsaved_user_omits_id_in_document() {
        let user = User::new("alice".to_string(), "abc".to_string());
        let doc = bson::to_document(&user).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("username").unwrap(), "alice");
        assert_eq!(doc.get_str("password_hash").unwrap(), "abc");
    }

    #[test]
    fn test_id_string_is_hex() {
        let mut user = User::new("bob".to_string(), "abc".to_string());
        let id = ObjectId::new();
        user.id = Some(id);

        assert_eq!(user.id_string(), Some(id.to_hex()));
    }
}
