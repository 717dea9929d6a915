//! hitcount core: transport-agnostic error types and the counter contract.
//!
//! This crate defines the counter key, the greeting rendered for each hit, and
//! the error surface shared by the gateway and its tests. It carries no
//! transport or runtime dependencies.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;

/// Shared result type.
pub use error::{HitError, Result};
