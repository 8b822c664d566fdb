//! HTTP surface: upload a PDF, download the converted Word document.
//!
//! Thin plumbing around [`crate::convert::convert_bytes`]. One endpoint does
//! the work: `POST /convert` with a multipart `pdf` file field answers 200
//! with docx bytes, 400 when no file is present, and 500 with a JSON error
//! body when the pipeline fails. Static assets (the upload form) are served
//! from an optional directory, CORS is permissive, and handler panics are
//! caught and logged so a poisoned request can never take the process down.

use crate::config::ConversionConfig;
use crate::convert::convert_bytes;
use crate::error::ScanDocxError;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::{error, info};

/// Largest accepted upload. Scanned PDFs are big; 50 MB covers hundreds of
/// pages at 300 DPI source scans.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Shared state for the conversion handlers.
pub struct AppState {
    pub config: ConversionConfig,
}

/// Build the application router.
///
/// `static_dir`, when present, is served as a fallback for everything the
/// API routes do not claim (the upload page and its assets).
pub fn app(config: ConversionConfig, static_dir: Option<PathBuf>) -> Router {
    let state = Arc::new(AppState { config });

    let mut router = Router::new()
        .route("/convert", post(convert_endpoint))
        .route("/healthz", get(healthz));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(
    addr: SocketAddr,
    config: ConversionConfig,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(config, static_dir)).await
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /convert`: multipart upload in, docx attachment out.
async fn convert_endpoint(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.to_string()))?
    {
        let is_pdf_field = field.name() == Some("pdf");
        let filename = field.file_name().map(|s| s.to_string());

        // The documented field name is `pdf`; any field carrying a filename
        // is accepted as a fallback so plain HTML forms keep working.
        if is_pdf_field || filename.is_some() {
            let name = filename.unwrap_or_else(|| "document.pdf".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadUpload(e.to_string()))?;
            upload = Some((name, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or(ApiError::NoFile)?;
    info!("Received upload '{}' ({} bytes)", filename, bytes.len());

    let output = convert_bytes(&bytes, &state.config)
        .await
        .map_err(ApiError::Pipeline)?;

    let attachment = format!(
        "attachment; filename=\"{}.docx\"",
        sanitize_base_name(&filename)
    );
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment),
        ],
        output.docx,
    )
        .into_response())
}

// ── Filename sanitisation ────────────────────────────────────────────────

/// Characters never allowed in a download filename: path separators,
/// Windows-reserved punctuation, quotes, and control characters.
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).unwrap());

/// Derive a safe download base name from the user-supplied upload filename.
///
/// The uploaded name is untrusted input; it is stripped of any directory
/// components and unsafe characters before it is echoed back in the
/// `Content-Disposition` header. An empty result falls back to `document`.
pub fn sanitize_base_name(filename: &str) -> String {
    // Take the final path component whichever separator style the client used.
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let stem = base.strip_suffix(".pdf").or_else(|| base.strip_suffix(".PDF")).unwrap_or(base);
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(stem, "");
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

// ── Error mapping ────────────────────────────────────────────────────────

/// Errors the convert endpoint can answer with.
enum ApiError {
    /// Request carried no file field.
    NoFile,
    /// Multipart body could not be read.
    BadUpload(String),
    /// The conversion pipeline failed.
    Pipeline(ScanDocxError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoFile => (StatusCode::BAD_REQUEST, "No file uploaded".to_string()),
            ApiError::BadUpload(detail) => {
                (StatusCode::BAD_REQUEST, format!("Bad upload: {detail}"))
            }
            ApiError::Pipeline(e) => {
                error!("Conversion error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
