//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 타입 있는 접근자로 중앙집중식 관리합니다.
//! 환경 변수는 `main`에서 `PROFILE`에 맞는 `.env.<profile>` 파일로부터 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, Rate Limiting 설정
//! - [`auth_config`] - 세션 토큰(JWT) 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{DatabaseConfig, ServerConfig, StorageBackend};
//!
//! let address = ServerConfig::bind_address();
//! if DatabaseConfig::storage_backend() == StorageBackend::Memory {
//!     // 인메모리 저장소 사용
//! }
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="bookdatabase"
//! export STORAGE_BACKEND="mongodb"     # mongodb | memory
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
