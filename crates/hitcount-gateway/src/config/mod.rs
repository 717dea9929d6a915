//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use hitcount_core::error::{HitError, Result};

pub use schema::{GatewayConfig, GatewaySection, StoreBackend, StoreSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "HITCOUNT_CONFIG";
/// Config file used when `HITCOUNT_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "hitcount.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        HitError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| HitError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve config for the binary.
///
/// An explicit `HITCOUNT_CONFIG` must load. The default file is optional;
/// built-in defaults apply when it is absent.
pub fn load_from_env() -> Result<GatewayConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "config file not found, using defaults");
            let cfg = GatewayConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
