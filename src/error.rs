//! Error types for the scandocx library.
//!
//! Every failure a conversion can hit is a variant of [`ScanDocxError`]. The
//! taxonomy mirrors the pipeline stages: input validation, rasterisation,
//! recognition, and docx packaging. All of them are fatal for the request:
//! a single bad page aborts the whole conversion rather than producing a
//! document with a silent gap.
//!
//! The only errors that are *not* propagated are cleanup failures while
//! releasing an artifact that already belongs to a failing request; those are
//! logged at WARN inside the artifact guards so they never mask the original
//! failure.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All errors returned by the scandocx library.
#[derive(Debug, Error)]
pub enum ScanDocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{}'\nCheck the path exists and is readable.", .path.display())]
    FileNotFound { path: PathBuf },

    /// The input bytes do not start with the PDF magic number.
    #[error("Input is not a valid PDF.\nFirst bytes: {magic:?}")]
    NotAPdf { magic: [u8; 4] },

    /// The file looks like a PDF but cannot be parsed.
    #[error("PDF could not be loaded: {detail}")]
    InvalidPdf { detail: String },

    /// The document parsed but reports zero pages. Rejected up front so no
    /// external process is ever spawned for it.
    #[error("PDF contains no pages")]
    EmptyDocument,

    // ── Rasterisation errors ──────────────────────────────────────────────
    /// The page-rendering tool could not be started at all.
    #[error("Failed to launch '{}': {source}\nIs poppler-utils installed and on PATH?", .tool.display())]
    RasterizerLaunchFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page-rendering tool ran but exited with an error status.
    #[error("Rasterisation failed for page {page} ({status}): {stderr}")]
    RasterizationFailed {
        page: usize,
        status: ExitStatus,
        stderr: String,
    },

    // ── Recognition errors ────────────────────────────────────────────────
    /// The OCR engine could not be started at all.
    #[error("Failed to launch '{}': {source}\nIs tesseract installed and on PATH?", .tool.display())]
    RecognizerLaunchFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OCR engine could not process a page image.
    #[error("Text recognition failed for page {page}: {detail}")]
    RecognitionFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The docx package could not be assembled or written.
    #[error("Failed to build docx output: {detail}")]
    DocxWrite { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Plumbing ──────────────────────────────────────────────────────────
    /// Filesystem error outside any specific stage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
