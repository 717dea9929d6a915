//! Shared application state for the hitcount gateway.
//!
//! Built once at startup and handed to every handler through axum `State`.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use hitcount_core::error::Result;

use crate::config::GatewayConfig;
use crate::obs::metrics::GatewayMetrics;
use crate::store::{self, CounterStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    store: Arc<dyn CounterStore>,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Build state with the store backend named in `cfg`.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let store = store::from_config(&cfg.store)?;
        Ok(Self::with_store(cfg, store))
    }

    pub fn with_store(cfg: GatewayConfig, store: Arc<dyn CounterStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: GatewayMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &dyn CounterStore {
        self.inner.store.as_ref()
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Run a store call, recording its latency and logging failures.
    pub async fn timed_store<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let res = fut.await;
        let metrics = self.metrics();
        metrics.store_duration.observe(&[("op", op)], started.elapsed());
        if let Err(e) = &res {
            metrics.store_errors.inc(&[("op", op)]);
            tracing::warn!(op, error = %e, "store call failed");
        }
        res
    }
}
