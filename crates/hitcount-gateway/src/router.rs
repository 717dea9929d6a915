//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hit))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
