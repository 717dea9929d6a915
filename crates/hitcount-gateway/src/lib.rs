//! hitcount gateway library entry.
//!
//! Wires config, the counter store, metrics, and the HTTP routes into a
//! servable axum app. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
