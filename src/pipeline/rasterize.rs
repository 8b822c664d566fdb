//! Page rasterisation: render one page to a PNG artifact via pdftoppm.
//!
//! ## Why an external process?
//!
//! pdftoppm (poppler-utils) is the rendering engine here, invoked as a
//! subprocess per page. The call is awaited to completion; the pipeline is
//! strictly sequential, so there is never more than one render in flight for
//! a request.
//!
//! ## Why `-singlefile`?
//!
//! Without it pdftoppm appends a zero-padded page number to the output
//! prefix, and the padding width depends on the document's total page count.
//! `-singlefile` writes exactly `<prefix>.png`, which makes the artifact
//! path deterministic for the guard that has to delete it.

use crate::config::ConversionConfig;
use crate::error::ScanDocxError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// A transient raster image for exactly one page.
///
/// The backing file is deleted when the guard is dropped: on success, on
/// recognition failure, and on unwind alike. Deletion failures are logged
/// and swallowed so they never mask the error that is already propagating.
pub struct PageArtifact {
    page: usize,
    path: PathBuf,
}

impl PageArtifact {
    /// 1-based index of the page this artifact was rendered from.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Path of the PNG file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PageArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Released artifact for page {}", self.page),
            Err(e) => warn!(
                "Failed to release artifact {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Render exactly one page of `pdf` to `<prefix>.png` at the configured DPI.
///
/// `page` is 1-based and must already be validated against the document's
/// page count; an out-of-range index is a bug in the caller, not a
/// recoverable condition here.
///
/// # Errors
/// [`ScanDocxError::RasterizerLaunchFailed`] when the tool cannot be started
/// at all, [`ScanDocxError::RasterizationFailed`] when it runs but exits
/// non-zero or produces no output file. Neither is retryable.
pub async fn rasterize_page(
    pdf: &Path,
    page: usize,
    prefix: &Path,
    config: &ConversionConfig,
) -> Result<PageArtifact, ScanDocxError> {
    debug_assert!(page >= 1, "page indices are 1-based");

    let output = Command::new(&config.pdftoppm_path)
        .arg("-f")
        .arg(page.to_string())
        .arg("-l")
        .arg(page.to_string())
        .arg("-png")
        .arg("-r")
        .arg(config.dpi.to_string())
        .arg("-singlefile")
        .arg(pdf)
        .arg(prefix)
        .output()
        .await
        .map_err(|e| ScanDocxError::RasterizerLaunchFailed {
            tool: config.pdftoppm_path.clone(),
            source: e,
        })?;

    let path = prefix.with_extension("png");

    if !output.status.success() {
        // pdftoppm may have written a partial file before failing.
        let _ = std::fs::remove_file(&path);
        return Err(ScanDocxError::RasterizationFailed {
            page,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    if !path.exists() {
        return Err(ScanDocxError::RasterizationFailed {
            page,
            status: output.status,
            stderr: "tool exited successfully but produced no output file".to_string(),
        });
    }

    debug!("Rendered page {} → {}", page, path.display());
    Ok(PageArtifact { page, path })
}
