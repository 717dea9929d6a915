//! hitcount gateway binary.
//!
//! - `GET /` bumps the `hits` counter in Redis and reports it
//! - `/healthz`, `/readyz`, `/metrics` for operators
//! - Graceful shutdown on Ctrl-C / SIGTERM (readiness flips to draining first)

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use hitcount_core::Result;
use hitcount_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hitcount-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let state = AppState::new(cfg)?;
    let listen = state.cfg().gateway.listen_addr()?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, store = %state.store().describe(), "hitcount-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| hitcount_core::HitError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| hitcount_core::HitError::Internal(format!("server failed: {e}")))?;

    tracing::info!("hitcount-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining");
    state.set_draining();
}
