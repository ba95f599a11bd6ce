use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::analysis::{AnalysisReport, Analyzer};
use crate::error::{log_analysis_error, AnalysisError, ErrorCode};

/// Multipart field carrying the upload
pub const AUDIO_FIELD: &str = "audio";

/// Static service identity reported by `/health`
pub const SERVICE_NAME: &str = "Speech Emotion Recognition";

/// Release stamp reported by `/health`
pub const SERVICE_TIMESTAMP: &str = "2024-12-31T10:46:02Z";

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    analyzer: Arc<Analyzer>,
    max_upload_bytes: usize,
}

impl HttpState {
    pub fn new(analyzer: Analyzer, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            max_upload_bytes,
        }
    }
}

/// Successful `/analyze` payload.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    /// Glyph-prefixed label, e.g. "😊 Happy"
    pub emotion: String,
    pub confidence: f64,
    /// Display color of the label
    pub color: &'static str,
    /// Base64 PNG, null when rendering failed
    pub visualization: Option<String>,
}

impl AnalyzeResponse {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let label = report.classification.label;
        Self {
            success: true,
            emotion: label.display_label(),
            confidence: report.classification.confidence,
            color: label.color(),
            visualization: report.visualization.as_ref().map(|image| image.to_base64()),
        }
    }
}

/// Failed `/analyze` payload.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub code: i32,
}

/// Health endpoint response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: &'static str,
}

fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::MissingAudio
        | AnalysisError::NoFileSelected
        | AnalysisError::EmptyPayload
        | AnalysisError::MalformedUpload { .. } => StatusCode::BAD_REQUEST,
        AnalysisError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AnalysisError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        log_analysis_error(&self, "POST /analyze");
        let body = FailureResponse {
            success: false,
            error: self.message(),
            code: self.code(),
        };
        (status_for(&self), Json(body)).into_response()
    }
}

/// Build the Axum router with all handlers.
pub fn build_router(state: HttpState) -> Router {
    let limit = state.max_upload_bytes;
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Run the HTTP server loop until `shutdown` resolves.
pub async fn run_http_server<F>(state: HttpState, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {}", addr))?;
    tracing::info!("[Http] Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("serving HTTP router")?;

    tracing::info!("[Http] Server stopped");
    Ok(())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: SERVICE_TIMESTAMP,
    })
}

pub async fn analyze(
    State(state): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let mut multipart = multipart.map_err(|rejection| AnalysisError::MalformedUpload {
        reason: rejection.body_text(),
    })?;
    let bytes = read_audio_field(&mut multipart, state.max_upload_bytes).await?;

    let analyzer = Arc::clone(&state.analyzer);
    let report = tokio::task::spawn_blocking(move || analyzer.analyze(&bytes))
        .await
        .map_err(|err| AnalysisError::Internal {
            details: err.to_string(),
        })?;

    Ok(Json(AnalyzeResponse::from_report(&report)))
}

async fn read_audio_field(multipart: &mut Multipart, limit: usize) -> Result<Bytes, AnalysisError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| map_multipart_error(err, limit))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        if field.file_name() == Some("") {
            return Err(AnalysisError::NoFileSelected);
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|err| map_multipart_error(err, limit))?;
        if bytes.is_empty() {
            return Err(AnalysisError::EmptyPayload);
        }
        return Ok(bytes);
    }

    Err(AnalysisError::MissingAudio)
}

fn map_multipart_error(err: MultipartError, limit: usize) -> AnalysisError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalysisError::PayloadTooLarge { limit }
    } else {
        AnalysisError::MalformedUpload {
            reason: err.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, VisualizationConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "emotion-test-boundary";

    fn make_router(limit: usize) -> Router {
        let config = AppConfig {
            visualization: VisualizationConfig {
                width: 240,
                height: 160,
                sample_rate: 1000,
                ..VisualizationConfig::default()
            },
            ..AppConfig::default()
        };
        build_router(HttpState::new(Analyzer::new(&config), limit))
    }

    fn multipart_body(field: &str, filename: &str, payload: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("analyze request")
    }

    async fn response_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body bytes");
        let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
        (status, json)
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        response_json(router.oneshot(request).await.expect("router call")).await
    }

    #[tokio::test]
    async fn health_reports_identity() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("health request");
        let (status, json) = call(make_router(1 << 20), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], SERVICE_NAME);
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["timestamp"], SERVICE_TIMESTAMP);
    }

    #[tokio::test]
    async fn analyze_returns_label_and_image() {
        let payload: Vec<u8> = (0..8000u32).map(|i| (i % 13) as u8).collect();
        let (status, json) = call(
            make_router(1 << 20),
            upload_request(multipart_body(AUDIO_FIELD, "clip.webm", &payload)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let emotion = json["emotion"].as_str().expect("emotion string");
        assert!(["Happy", "Angry", "Sad", "Neutral", "Surprised", "Fearful"]
            .iter()
            .any(|name| emotion.ends_with(name)));
        let confidence = json["confidence"].as_f64().expect("confidence number");
        assert!((0.60..=0.95).contains(&confidence));
        assert!(json["color"].as_str().unwrap_or_default().starts_with('#'));

        let encoded = json["visualization"].as_str().expect("visualization string");
        let png = BASE64.decode(encoded).expect("valid base64");
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn analyze_is_reproducible() {
        let payload = vec![42u8; 3000];
        let (_, first) = call(
            make_router(1 << 20),
            upload_request(multipart_body(AUDIO_FIELD, "a.wav", &payload)),
        )
        .await;
        let (_, second) = call(
            make_router(1 << 20),
            upload_request(multipart_body(AUDIO_FIELD, "a.wav", &payload)),
        )
        .await;

        assert_eq!(first["emotion"], second["emotion"]);
        assert_eq!(first["confidence"], second["confidence"]);
    }

    #[tokio::test]
    async fn analyze_requires_audio_field() {
        let (status, json) = call(
            make_router(1 << 20),
            upload_request(multipart_body("document", "notes.txt", b"hello")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No audio file provided");
    }

    #[tokio::test]
    async fn analyze_rejects_empty_filename() {
        let (status, json) = call(
            make_router(1 << 20),
            upload_request(multipart_body(AUDIO_FIELD, "", b"RIFF0000")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No file selected");
    }

    #[tokio::test]
    async fn analyze_rejects_empty_payload() {
        let (status, json) = call(
            make_router(1 << 20),
            upload_request(multipart_body(AUDIO_FIELD, "silence.wav", b"")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Empty audio payload");
    }

    #[tokio::test]
    async fn analyze_rejects_non_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/octet-stream")
            .body(Body::from(vec![1u8, 2, 3]))
            .expect("raw request");
        let (status, json) = call(make_router(1 << 20), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 3005);
    }

    #[tokio::test]
    async fn analyze_enforces_upload_limit() {
        let payload = vec![7u8; 16 * 1024];
        let (status, json) = call(
            make_router(4 * 1024),
            upload_request(multipart_body(AUDIO_FIELD, "big.wav", &payload)),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["success"], false);
    }
}
