//! In-process counter store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use hitcount_core::error::{HitError, Result};

use super::CounterStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, i64>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `key`, as if another writer had touched the counter.
    pub async fn seed(&self, key: &str, value: i64) {
        self.values.lock().await.insert(key.to_string(), value);
    }

    /// While set, every operation fails with `StoreUnavailable`.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::Relaxed);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(HitError::StoreUnavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        self.check()?;
        let mut values = self.values.lock().await;
        let v = values.entry(key.to_string()).or_insert(0);
        *v = v
            .checked_add(1)
            .ok_or_else(|| HitError::StoreUnavailable(format!("incr: {key} would overflow")))?;
        Ok(*v)
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        self.check()?;
        Ok(self.values.lock().await.get(key).copied())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    fn describe(&self) -> String {
        "in-memory store".into()
    }
}
