//! Background worker helper
//!
//! 목록 조회, 검색처럼 무거운 조회 작업을 요청 처리 흐름과 분리된
//! tokio 태스크에서 실행합니다. 성공/실패는 태스크의 `Result`로 전달됩니다.

use std::future::Future;

use crate::core::errors::{AppError, AppResult};

/// 주어진 작업을 워커 태스크로 보내고 완료를 기다립니다.
///
/// 태스크가 패닉하거나 취소되면 `InternalError`로 변환됩니다.
///
/// ```rust,ignore
/// let books = run_in_background("list_books", async move { repo.get_all().await }).await?;
/// ```
pub async fn run_in_background<F, T>(label: &'static str, task: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>> + Send + 'static,
    T: Send + 'static,
{
    log::debug!("백그라운드 작업 시작: {}", label);

    match tokio::task::spawn(task).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("백그라운드 작업 실패: {} ({})", label, e);
            Err(AppError::InternalError(format!("{} 작업이 완료되지 못했습니다: {}", label, e)))
        }
    }
}
