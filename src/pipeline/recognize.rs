//! Text recognition: drive the tesseract OCR engine over page artifacts.
//!
//! ## Engine lifecycle
//!
//! Initialising an OCR engine is the expensive part of recognition, so the
//! engine is modelled as an acquired resource: [`TextRecognizer::acquire`]
//! probes the binary and claims a private scratch directory for engine
//! output, one per request. The same engine instance then serves every page
//! of that request. Release (removal of the scratch directory) happens in
//! `Drop`, so it runs on every exit path including recognition failure.

use crate::config::ConversionConfig;
use crate::error::ScanDocxError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

/// An acquired OCR engine bound to one request.
///
/// Operates over the fixed language set declared in the configuration; the
/// default covers one Latin-script and one right-to-left-script language so
/// mixed-script documents are recognised in a single pass.
pub struct TextRecognizer {
    tesseract: PathBuf,
    language_spec: String,
    workdir: TempDir,
}

impl TextRecognizer {
    /// Initialise the engine for one request.
    ///
    /// Probes the tesseract binary so a missing installation surfaces here,
    /// before any page work has been done, rather than half-way through a
    /// document.
    pub async fn acquire(config: &ConversionConfig) -> Result<Self, ScanDocxError> {
        Command::new(&config.tesseract_path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| ScanDocxError::RecognizerLaunchFailed {
                tool: config.tesseract_path.clone(),
                source: e,
            })?;

        let workdir = TempDir::new()?;
        debug!(
            "Acquired OCR engine ({}, languages {})",
            config.tesseract_path.display(),
            config.language_spec()
        );

        Ok(Self {
            tesseract: config.tesseract_path.clone(),
            language_spec: config.language_spec(),
            workdir,
        })
    }

    /// Recognise the text on one page image.
    ///
    /// Returns the recognised text, which may be empty when the engine finds
    /// nothing on the page; absence of text is not an error.
    ///
    /// # Errors
    /// [`ScanDocxError::RecognitionFailed`] when the engine exits non-zero or
    /// produces no output; [`ScanDocxError::RecognizerLaunchFailed`] when the
    /// binary vanished after acquisition. Not retried.
    pub async fn recognize(&self, page: usize, image: &Path) -> Result<String, ScanDocxError> {
        let out_base = self.workdir.path().join(format!("page-{page}"));

        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg(&out_base)
            .arg("-l")
            .arg(&self.language_spec)
            .output()
            .await
            .map_err(|e| ScanDocxError::RecognizerLaunchFailed {
                tool: self.tesseract.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ScanDocxError::RecognitionFailed {
                page,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let out_path = out_base.with_extension("txt");
        let text = tokio::fs::read_to_string(&out_path).await.map_err(|e| {
            ScanDocxError::RecognitionFailed {
                page,
                detail: format!("engine produced no readable output: {e}"),
            }
        })?;

        // Keep the scratch footprint to one page at a time; the directory
        // itself is removed on release regardless.
        if let Err(e) = tokio::fs::remove_file(&out_path).await {
            warn!("Failed to remove OCR output {}: {}", out_path.display(), e);
        }

        debug!("Recognised page {} ({} chars)", page, text.len());
        Ok(text)
    }
}

impl Drop for TextRecognizer {
    fn drop(&mut self) {
        // The TempDir field removes the scratch directory after this runs.
        debug!("Released OCR engine");
    }
}
