//! 도서 카탈로그 서비스 모듈

pub mod catalog_service;

pub use catalog_service::CatalogService;
