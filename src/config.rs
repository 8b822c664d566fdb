//! Configuration types for PDF-to-docx conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across requests and to point tests at stub
//! implementations of the external tools.

use crate::error::ScanDocxError;
use std::path::PathBuf;

/// Configuration for a PDF-to-docx conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use scandocx::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(300)
///     .languages(["eng", "ara"])
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 72–600. Default: 300.
    ///
    /// 300 DPI is the resolution OCR engines are trained against; lower values
    /// lose small print, higher values only grow the artifact without gaining
    /// recognition accuracy.
    pub dpi: u32,

    /// OCR language set, in tesseract language-code form. Default: `["eng", "ara"]`.
    ///
    /// The set is fixed for the whole conversion and must contain at least one
    /// entry. The default pairs a Latin-script language with a right-to-left
    /// script so documents that mix both are recognised in one pass.
    pub languages: Vec<String>,

    /// Path or command name of the page-rendering tool. Default: `pdftoppm`.
    pub pdftoppm_path: PathBuf,

    /// Path or command name of the OCR engine. Default: `tesseract`.
    pub tesseract_path: PathBuf,

    /// Directory for per-request raster artifacts. Default: `None` (a private
    /// temp directory per request).
    ///
    /// Artifact names carry a per-request UUID either way, so a shared
    /// directory never causes collisions between concurrent conversions.
    pub work_dir: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            languages: vec!["eng".to_string(), "ara".to_string()],
            pdftoppm_path: PathBuf::from("pdftoppm"),
            tesseract_path: PathBuf::from("tesseract"),
            work_dir: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The language set in the `+`-joined form the OCR engine expects.
    pub fn language_spec(&self) -> String {
        self.languages.join("+")
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn languages<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = langs.into_iter().map(Into::into).collect();
        self
    }

    pub fn pdftoppm_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdftoppm_path = path.into();
        self
    }

    pub fn tesseract_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tesseract_path = path.into();
        self
    }

    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.work_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ScanDocxError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(ScanDocxError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.languages.is_empty() {
            return Err(ScanDocxError::InvalidConfig(
                "At least one OCR language is required".into(),
            ));
        }
        if c.languages.iter().any(|l| l.is_empty() || l.contains('+')) {
            return Err(ScanDocxError::InvalidConfig(
                "Language codes must be non-empty and must not contain '+'".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_spec_covers_both_scripts() {
        let config = ConversionConfig::default();
        assert_eq!(config.language_spec(), "eng+ara");
    }

    #[test]
    fn builder_rejects_out_of_range_dpi() {
        let result = ConversionConfig::builder().dpi(30).build();
        assert!(matches!(result, Err(ScanDocxError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_empty_language_set() {
        let result = ConversionConfig::builder()
            .languages(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(ScanDocxError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_joined_language_codes() {
        let result = ConversionConfig::builder().languages(["eng+ara"]).build();
        assert!(matches!(result, Err(ScanDocxError::InvalidConfig(_))));
    }

    #[test]
    fn builder_accepts_custom_tools() {
        let config = ConversionConfig::builder()
            .pdftoppm_path("/opt/poppler/bin/pdftoppm")
            .tesseract_path("/opt/tesseract/bin/tesseract")
            .build()
            .unwrap();
        assert_eq!(
            config.pdftoppm_path,
            PathBuf::from("/opt/poppler/bin/pdftoppm")
        );
        assert_eq!(
            config.tesseract_path,
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );
    }
}
