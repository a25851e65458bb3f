//! # Embedded-Collection Upsert Engine
//!
//! 도서 문서 안의 배열(`reviews`, `ratings`, `authors`)에 대해
//! "키가 같은 요소가 있으면 교체, 없으면 추가"를 수행합니다.
//!
//! ## 알고리즘
//!
//! ```text
//! lock(parent_id, array_field, key)
//!   1. set_array_element(key → replacement)
//!        matched > 0  → Updated
//!   2. push_array_element(new_element)
//!        matched == 0 → NotFound (부모 문서 없음)
//!        otherwise    → Inserted
//! unlock
//! ```
//!
//! 1단계는 `modified`가 아니라 `matched` 수로 판단합니다. 같은 값을 다시 제출해
//! 문서가 바뀌지 않은 경우에도 요소가 존재하므로 추가하지 않습니다.
//!
//! 두 단계 사이에 같은 키로 들어온 다른 요청이 끼어들면 같은 키의 요소가 두 번
//! 추가될 수 있습니다. 이 프로세스 안에서는 `(부모, 배열, 키)` 단위의 비동기 잠금으로
//! 두 단계를 직렬화하여 이를 막습니다. 여러 프로세스가 같은 컬렉션을 쓰는 배포에서는
//! 이 보장이 유지되지 않습니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::store::{BookStore, ElementKey};
use crate::core::errors::{AppError, AppResult};

/// 업서트 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 같은 키의 요소가 없어 새로 추가됨
    Inserted,
    /// 같은 키의 요소를 교체함
    Updated,
}

/// 키 단위 비동기 잠금 테이블
///
/// 잠금이 풀리고 더 이상 기다리는 쪽이 없으면 항목을 테이블에서 제거합니다.
#[derive(Debug, Default, Clone)]
pub struct KeyedLocks {
    slots: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

/// [`KeyedLocks::acquire`]가 돌려주는 잠금 가드
pub struct KeyedGuard {
    key: String,
    slots: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: String) -> KeyedGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.entry(key.clone()).or_default().clone()
        };

        let guard = slot.lock_owned().await;

        KeyedGuard {
            key,
            slots: Arc::clone(&self.slots),
            guard: Some(guard),
        }
    }

    /// 현재 테이블에 남아 있는 키 수
    pub fn active_keys(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        self.guard.take();

        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let idle = slots
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1);
        if idle {
            slots.remove(&self.key);
        }
    }
}

/// 내장 배열 업서트 엔진
#[derive(Clone)]
pub struct UpsertEngine {
    store: Arc<dyn BookStore>,
    locks: KeyedLocks,
}

impl UpsertEngine {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// `parent_id` 문서의 `array_field` 배열에서 `match_key`와 일치하는 요소를
    /// `replacement` 필드로 갱신하고, 없으면 `new_element`를 추가합니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 부모 문서가 없음
    /// * `DatabaseError` - 저장소 오류 (복구하지 않고 그대로 전달)
    pub async fn upsert_by_key(
        &self,
        parent_id: &ObjectId,
        array_field: &str,
        match_key: &ElementKey,
        replacement: Document,
        new_element: Document,
    ) -> AppResult<UpsertOutcome> {
        let _guard = self
            .locks
            .acquire(lock_key(parent_id, array_field, match_key))
            .await;

        let updated = self
            .store
            .set_array_element(parent_id, array_field, match_key, replacement)
            .await?;
        if updated.matched > 0 {
            debug!("{}.{} 요소 교체 (modified={})", parent_id, array_field, updated.modified);
            return Ok(UpsertOutcome::Updated);
        }

        let pushed = self
            .store
            .push_array_element(parent_id, array_field, new_element)
            .await?;
        if pushed.matched == 0 {
            return Err(AppError::NotFound(format!(
                "도서를 찾을 수 없습니다: {}",
                parent_id.to_hex()
            )));
        }

        debug!("{}.{} 요소 추가", parent_id, array_field);
        Ok(UpsertOutcome::Inserted)
    }
}

fn lock_key(parent_id: &ObjectId, array_field: &str, match_key: &ElementKey) -> String {
    let mut key = format!("{}/{}", parent_id.to_hex(), array_field);
    for (name, value) in match_key {
        let rendered = match value {
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        };
        key.push('/');
        key.push_str(name);
        key.push('=');
        key.push_str(&rendered);
    }
    key
}
