//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! 카탈로그에서 사용자는 로그인과 리뷰 작성자명 확인에만 쓰이므로
//! 조회와 생성만 제공합니다.
//!
//! ## 특징
//!
//! - **저장소 추상화**: [`UserStore`] 트레이트 뒤에 MongoDB와 인메모리 구현
//! - **데이터 무결성**: 사용자명 유니크 제약 (애플리케이션 검사 + 유니크 인덱스)

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use log::info;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;

/// 사용자 컬렉션 이름
pub const USERS_COLLECTION: &str = "users";

/// 사용자 문서 저장소
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// 사용자를 저장하고 부여된 ID를 반환합니다.
    async fn insert(&self, user: &User) -> AppResult<Option<ObjectId>>;
}

/// MongoDB `users` 컬렉션 저장소
///
/// `User`는 serde 파생이므로 타입 있는 컬렉션을 그대로 사용합니다.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(collection: Collection<User>) -> Self {
        Self { collection }
    }

    /// 사용자명 유니크 인덱스 생성
    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        self.collection
            .create_index(username_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, user: &User) -> AppResult<Option<ObjectId>> {
        let result = self.collection
            .insert_one(user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.inserted_id.as_object_id())
    }
}

/// 인메모리 사용자 저장소 (테스트, `STORAGE_BACKEND=memory`)
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poison_err<T>(_: PoisonError<T>) -> AppError {
    AppError::InternalError("in-memory user store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poison_err)?;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poison_err)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<Option<ObjectId>> {
        let mut users = self.users.write().map_err(poison_err)?;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::DatabaseError(format!("duplicate username {}", user.username)));
        }

        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = Some(id);
        users.push(stored);

        Ok(Some(id))
    }
}

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// - **InvalidIdentifier**: 잘못된 ObjectId 형식
/// - **ConflictError**: 사용자명 중복
/// - **PersistenceError**: 저장 후 ID를 받지 못함
/// - **DatabaseError**: 저장소 오류
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(Arc::new(InMemoryUserStore::new()));
///
/// let created = repo.create(User::new("alice".into(), hash)).await?;
/// let found = repo.find_by_username("alice").await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// ID로 사용자 조회
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::InvalidIdentifier)` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::InvalidIdentifier("유효하지 않은 사용자 ID 형식입니다".to_string()))?;

        self.store.find_by_id(&object_id).await
    }

    /// 사용자명으로 사용자 조회
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.store.find_by_username(username).await
    }

    /// 새 사용자 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let id = self.store.insert(&user).await?.ok_or_else(|| {
            AppError::PersistenceError(format!("사용자 '{}' 저장 후 ID를 받지 못했습니다", user.username))
        })?;
        user.id = Some(id);

        info!("👤 사용자 생성: {} ({})", user.username, id.to_hex());
        Ok(user)
    }
}
