//! Shared error type across hitcount crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input or config.
    BadRequest,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// The key-value store could not be reached or refused the command.
    StoreUnavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HitError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HitError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    /// Connection failure, timeout, or a store-side error on increment or read.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl HitError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HitError::BadRequest(_) => ClientCode::BadRequest,
            HitError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HitError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            HitError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, HitError::StoreUnavailable(_))
    }
}
