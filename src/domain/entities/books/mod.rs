//! 도서 애그리거트 엔티티 모듈
//!
//! [`Book`](book::Book)과 내장 값 객체 [`Genre`](book::Genre), [`Author`](book::Author),
//! [`Review`](book::Review), [`Rating`](book::Rating)을 제공합니다.

pub mod book;

pub use book::*;
