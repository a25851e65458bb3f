//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserRepository`](user_repo::UserRepository)는 [`UserStore`](user_repo::UserStore)
//! 구현체(MongoDB 또는 인메모리)를 통해 사용자를 조회하고 생성합니다.

pub mod user_repo;

pub use user_repo::{InMemoryUserStore, MongoUserStore, UserRepository, UserStore, USERS_COLLECTION};
