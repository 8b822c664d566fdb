//! Conversion entry points: drive the per-page pipeline end to end.
//!
//! ## Sequencing
//!
//! Pages are processed strictly in order, one at a time. Each iteration
//! renders the page, recognises it, appends the text, and releases the
//! raster artifact before the next page starts, so at most one artifact
//! exists on disk at any instant and the disk footprint of a request is one
//! page image, regardless of document size. The pipeline suspends only at
//! the rasterise/recognise subprocess boundaries.
//!
//! ## Failure behaviour
//!
//! Any page failure aborts the whole conversion; there is no partial
//! document for a multi-page input with one bad page. The artifact guard's
//! `Drop` runs before a propagating error leaves the loop body, so cleanup
//! always precedes the abort. The OCR engine acquired for the request is
//! likewise released on every exit path.

use crate::config::ConversionConfig;
use crate::docx;
use crate::error::ScanDocxError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::{assemble, input::InputDocument, rasterize, recognize::TextRecognizer};
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info};
use uuid::Uuid;

/// Convert a PDF file on disk to a Word document.
pub async fn convert_file(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ScanDocxError> {
    let document = InputDocument::open(path).await?;
    convert_document(&document, config).await
}

/// Convert in-memory PDF bytes to a Word document.
///
/// This is the entry point the HTTP surface uses: the bytes are written to
/// request-private temp storage which is removed when conversion completes,
/// success or failure.
pub async fn convert_bytes(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<ConversionOutput, ScanDocxError> {
    let document = InputDocument::from_bytes(bytes).await?;
    convert_document(&document, config).await
}

/// Run the full pipeline for a validated document.
async fn convert_document(
    document: &InputDocument,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ScanDocxError> {
    let total_start = Instant::now();
    let page_count = document.page_count();
    info!("Starting conversion ({} pages)", page_count);

    // The OCR engine is acquired once and reused for every page of this
    // request; its scratch space is released when this function returns.
    let recognizer = TextRecognizer::acquire(config).await?;

    // Raster artifacts go either into the configured directory or a private
    // temp directory. Names carry a request UUID so concurrent requests
    // sharing a directory never collide.
    let scratch;
    let artifact_dir: &Path = match &config.work_dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir).await?;
            dir
        }
        None => {
            scratch = TempDir::new()?;
            scratch.path()
        }
    };
    let request_id = Uuid::new_v4();

    let mut accumulated = String::new();
    let mut rasterize_ms = 0u64;
    let mut recognize_ms = 0u64;

    for page in 1..=page_count {
        let prefix = artifact_dir.join(format!("{request_id}-page{page}"));

        let stage_start = Instant::now();
        let artifact = rasterize::rasterize_page(document.path(), page, &prefix, config).await?;
        rasterize_ms += stage_start.elapsed().as_millis() as u64;

        let stage_start = Instant::now();
        // The artifact guard is still in scope here: if recognition fails,
        // the `?` drops it on the way out, deleting the page image before
        // the error reaches the caller.
        let text = recognizer.recognize(page, artifact.path()).await?;
        recognize_ms += stage_start.elapsed().as_millis() as u64;

        accumulated.push_str(&text);
        accumulated.push_str("\n\n");
        debug!("Accumulated page {}/{}", page, page_count);
    }

    let paragraphs = assemble::assemble(&accumulated);
    let docx = docx::write_docx(&paragraphs)?;

    let stats = ConversionStats {
        page_count,
        paragraph_count: paragraphs.len(),
        rasterize_duration_ms: rasterize_ms,
        recognize_duration_ms: recognize_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} pages, {} paragraphs, {}ms total",
        stats.page_count, stats.paragraph_count, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        docx,
        paragraphs,
        stats,
    })
}
