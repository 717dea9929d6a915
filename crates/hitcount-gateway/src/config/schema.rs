use std::net::SocketAddr;

use serde::Deserialize;
use hitcount_core::error::{HitError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            store: StoreSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HitError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            HitError::BadRequest(format!("gateway.listen must be a valid socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// In-process map; counts are lost on restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub db: i64,

    /// Bounds connection setup and each command.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            host: default_host(),
            port: default_port(),
            db: 0,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(HitError::BadRequest(
                "store.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.backend == StoreBackend::Redis && self.host.trim().is_empty() {
            return Err(HitError::BadRequest("store.host must not be empty".into()));
        }
        if self.db < 0 {
            return Err(HitError::BadRequest("store.db must not be negative".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

fn default_host() -> String {
    "redis-server".into()
}
fn default_port() -> u16 {
    6379
}
fn default_timeout_ms() -> u64 {
    2000
}
