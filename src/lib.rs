//! # scandocx
//!
//! Convert scanned PDF documents into editable Word documents (.docx).
//!
//! ## Why this crate?
//!
//! A scanned PDF is a stack of page images; there is no text to copy out of
//! it. This crate rasterises each page back into a bitmap, runs an OCR
//! engine over it, and rebuilds the recognised text as a plain editable
//! Word document, detecting per-paragraph layout direction so documents
//! mixing Latin and Arabic script come out readable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate bytes, count pages (lopdf)
//!  ├─ 2. Rasterize  one page → one PNG artifact (pdftoppm, 300 DPI)
//!  ├─ 3. Recognize  artifact → text (tesseract, eng+ara)
//!  ├─ 4. Assemble   accumulated text → directed paragraphs
//!  └─ 5. Package    paragraphs → .docx bytes (zip + Open XML)
//! ```
//!
//! Pages are processed strictly in order, one at a time; each page's raster
//! artifact is deleted before the next page is rendered, so a conversion
//! never holds more than one page image on disk. Any page failure aborts
//! the whole conversion, so no partial documents.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scandocx::{convert_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert_file("scan.pdf", &config).await?;
//!     std::fs::write("scan.docx", &output.docx)?;
//!     eprintln!("{} pages, {} paragraphs", output.stats.page_count,
//!         output.stats.paragraph_count);
//!     Ok(())
//! }
//! ```
//!
//! ## External tools
//!
//! Rasterisation and recognition are delegated to external binaries:
//! `pdftoppm` (poppler-utils) and `tesseract` with the `eng` and `ara`
//! language packs. Both paths are overridable via [`ConversionConfig`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `scandocx` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod docx;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert_bytes, convert_file};
pub use error::ScanDocxError;
pub use output::{ConversionOutput, ConversionStats, Direction, Paragraph};
