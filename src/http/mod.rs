//! HTTP surface around the analyzer.
//!
//! A small Axum server exposing `POST /analyze` (multipart upload, field
//! `audio`) and `GET /health`. Analysis runs on the blocking pool; the
//! handlers only validate the upload and shape the JSON response.

mod routes;

pub use routes::{
    analyze, build_router, health, run_http_server, AnalyzeResponse, FailureResponse,
    HealthResponse, HttpState, AUDIO_FIELD, SERVICE_NAME, SERVICE_TIMESTAMP,
};

use crate::analysis::Analyzer;
use crate::config::AppConfig;

/// Build state from configuration and serve until Ctrl-C.
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.server.resolved_addr();
    let state = HttpState::new(Analyzer::new(config), config.server.max_upload_bytes);

    run_http_server(state, addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("[Http] Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
        tracing::info!("[Http] Shutdown requested");
    })
    .await
}
