//! Input validation: turn raw bytes or a local path into a checked document.
//!
//! ## Why a temp file?
//!
//! pdftoppm needs a filesystem path; it cannot read from a byte buffer. When
//! the caller hands us bytes (the upload case), they are written into a
//! request-private `TempDir` that lives exactly as long as the
//! [`InputDocument`], so the upload is guaranteed to be deleted when the
//! request completes, whatever the outcome. We validate the PDF magic bytes
//! (`%PDF`) and the page count up front so a broken or empty upload is
//! rejected before any external process is spawned.

use crate::error::ScanDocxError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// An opened, validated paginated document.
///
/// Read-only for the duration of a conversion. Dropping it releases the
/// backing temp storage when the document was created from bytes.
pub struct InputDocument {
    path: PathBuf,
    page_count: usize,
    /// Keeps the upload's temp directory alive until the request completes.
    _scratch: Option<TempDir>,
}

impl InputDocument {
    /// Open and validate a PDF already on disk.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ScanDocxError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ScanDocxError::FileNotFound { path });
        }

        let page_count = validate(path.clone()).await?;
        debug!("Opened PDF {} ({} pages)", path.display(), page_count);

        Ok(Self {
            path,
            page_count,
            _scratch: None,
        })
    }

    /// Write uploaded PDF bytes to request-private storage and validate them.
    pub async fn from_bytes(bytes: &[u8]) -> Result<Self, ScanDocxError> {
        check_magic(bytes)?;

        let scratch = TempDir::new()?;
        let path = scratch.path().join("input.pdf");
        tokio::fs::write(&path, bytes).await?;

        let page_count = validate(path.clone()).await?;
        debug!("Stored upload ({} bytes, {} pages)", bytes.len(), page_count);

        Ok(Self {
            path,
            page_count,
            _scratch: Some(scratch),
        })
    }

    /// Path to the PDF file for the external rendering tool.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total pages in the document. Always ≥ 1.
    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Reject inputs that do not start with the PDF magic number.
fn check_magic(bytes: &[u8]) -> Result<(), ScanDocxError> {
    if bytes.len() < 4 {
        return Err(ScanDocxError::InvalidPdf {
            detail: format!("input truncated at {} bytes", bytes.len()),
        });
    }
    if &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(ScanDocxError::NotAPdf { magic });
    }
    Ok(())
}

/// Parse the PDF and count its pages.
///
/// lopdf is synchronous and CPU-bound, so parsing runs in `spawn_blocking`
/// to keep it off the async worker threads.
async fn validate(path: PathBuf) -> Result<usize, ScanDocxError> {
    let page_count = tokio::task::spawn_blocking(move || -> Result<usize, ScanDocxError> {
        let mut magic = [0u8; 4];
        {
            use std::io::Read;
            let mut file = std::fs::File::open(&path)?;
            if file.read_exact(&mut magic).is_err() {
                return Err(ScanDocxError::InvalidPdf {
                    detail: "input truncated before the PDF header".into(),
                });
            }
        }
        if &magic != b"%PDF" {
            return Err(ScanDocxError::NotAPdf { magic });
        }

        let document = lopdf::Document::load(&path).map_err(|e| ScanDocxError::InvalidPdf {
            detail: e.to_string(),
        })?;
        Ok(document.get_pages().len())
    })
    .await
    .map_err(|e| ScanDocxError::Internal(format!("Validation task panicked: {e}")))??;

    if page_count == 0 {
        return Err(ScanDocxError::EmptyDocument);
    }
    Ok(page_count)
}
