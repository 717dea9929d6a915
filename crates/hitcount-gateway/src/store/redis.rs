//! Redis-backed counter store.
//!
//! One multiplexed connection is opened lazily and shared by every request.
//! Connection setup and each command are bounded by the configured timeout;
//! any failure drops the cached connection so the next call reconnects.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, Cmd, FromRedisValue, RedisResult};
use tokio::sync::Mutex;

use hitcount_core::error::{HitError, Result};

use super::CounterStore;
use crate::config::StoreSection;

pub struct RedisStore {
    client: Client,
    target: String,
    timeout: Duration,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Does not connect; the first command opens the connection.
    pub fn new(cfg: &StoreSection) -> Result<Self> {
        let target = format!("redis://{}:{}/{}", cfg.host, cfg.port, cfg.db);
        let client = Client::open(target.as_str())
            .map_err(|e| HitError::BadRequest(format!("invalid redis target {target}: {e}")))?;

        Ok(Self {
            client,
            target,
            timeout: cfg.timeout(),
            connection: Mutex::new(None),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        if let Some(conn) = self.connection.lock().await.as_ref() {
            return Ok(conn.clone());
        }

        // Lock is not held across the connect: each caller waits one timeout at most.
        let conn = self
            .bounded("connect", self.client.get_multiplexed_async_connection())
            .await?;

        let mut slot = self.connection.lock().await;
        match slot.as_ref() {
            Some(existing) => Ok(existing.clone()),
            None => {
                tracing::debug!(target_addr = %self.target, "redis connection established");
                *slot = Some(conn.clone());
                Ok(conn)
            }
        }
    }

    async fn invalidate(&self) {
        self.connection.lock().await.take();
    }

    async fn bounded<T>(&self, op: &str, fut: impl Future<Output = RedisResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(HitError::StoreUnavailable(format!("{op}: {e}"))),
            Err(_) => Err(HitError::StoreUnavailable(format!(
                "{op}: timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    /// Run one command, discarding the connection if it fails.
    async fn query<T>(&self, op: &str, cmd: Cmd) -> Result<T>
    where
        T: FromRedisValue + Send,
    {
        let mut conn = self.connection().await?;
        let res = self.bounded(op, cmd.query_async(&mut conn)).await;
        if res.is_err() {
            self.invalidate().await;
        }
        res
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut cmd = redis::cmd("INCR");
        cmd.arg(key);
        self.query("incr", cmd).await
    }

    async fn get(&self, key: &str) -> Result<Option<i64>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        let raw: Option<String> = self.query("get", cmd).await?;

        raw.map(|s| {
            s.trim().parse::<i64>().map_err(|e| {
                HitError::StoreUnavailable(format!("get: value of {key} is not an integer: {e}"))
            })
        })
        .transpose()
    }

    async fn ping(&self) -> Result<()> {
        let _: String = self.query("ping", redis::cmd("PING")).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Redis at {}", self.target)
    }
}
