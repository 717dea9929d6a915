//! Counter store abstraction.
//!
//! The gateway only needs three things from the external store: an atomic
//! increment, a read, and a liveness probe. [`RedisStore`] speaks RESP to a
//! real server; [`MemoryStore`] keeps everything in-process.

pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use hitcount_core::Result;

use crate::config::{StoreBackend, StoreSection};

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add one to `key` and return the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Current value of `key`, `None` if the store has never seen it.
    async fn get(&self, key: &str) -> Result<Option<i64>>;

    /// Round-trip to the store without touching any key.
    async fn ping(&self) -> Result<()>;

    /// Where this store points, for logs.
    fn describe(&self) -> String;
}

/// Build the configured backend.
pub fn from_config(cfg: &StoreSection) -> Result<Arc<dyn CounterStore>> {
    Ok(match cfg.backend {
        StoreBackend::Redis => Arc::new(RedisStore::new(cfg)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    })
}
