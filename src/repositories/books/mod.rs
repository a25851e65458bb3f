//! 도서 데이터 액세스 계층
//!
//! ```text
//! BookRepository ──► UpsertEngine ──┐
//!        │                          ├──► dyn BookStore ──► MongoBookStore | InMemoryBookStore
//!        └──────► mapper ◄──────────┘
//! ```

pub mod book_repo;
pub mod mapper;
pub mod memory_store;
pub mod mongo_store;
pub mod store;
pub mod upsert;

pub use book_repo::BookRepository;
pub use memory_store::InMemoryBookStore;
pub use mongo_store::{MongoBookStore, BOOKS_COLLECTION};
pub use store::{BookFilter, BookStore, SearchField, WriteCounts};
pub use upsert::{KeyedLocks, UpsertEngine, UpsertOutcome};
