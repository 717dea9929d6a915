//! `GET /`: bump the hit counter and report it.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hitcount_core::counter::{render_greeting, HITS_KEY};
use hitcount_core::error::{ClientCode, HitError, Result};

use crate::app_state::AppState;

pub async fn hit(State(state): State<AppState>) -> Response {
    let res = record_hit(&state).await;
    let resp = match res {
        Ok(count) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_greeting(count),
        )
            .into_response(),
        Err(e) => error_response(&e),
    };
    state
        .metrics()
        .http_requests
        .inc(&[("route", "/"), ("status", resp.status().as_str())]);
    resp
}

/// Increment, then read back what the store now holds.
pub async fn record_hit(state: &AppState) -> Result<i64> {
    let store = state.store();
    let after_incr = state.timed_store("incr", store.incr(HITS_KEY)).await?;
    // The reported count is whatever the read returns, not the INCR reply.
    let count = state
        .timed_store("get", store.get(HITS_KEY))
        .await?
        .ok_or_else(|| {
            HitError::StoreUnavailable(format!("{HITS_KEY} missing after incr to {after_incr}"))
        })?;
    tracing::debug!(count, "hit recorded");
    Ok(count)
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(e: &HitError) -> Response {
    let code = e.client_code();
    let body = Json(json!({
        "error": code.as_str(),
        "message": e.to_string(),
    }));
    (status_for(code), body).into_response()
}
