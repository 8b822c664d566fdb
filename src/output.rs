//! Output types: the assembled document and conversion statistics.

use serde::{Deserialize, Serialize};

/// Text flow direction of one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right (Latin and most other scripts).
    Ltr,
    /// Right-to-left (paragraph contains Arabic-block characters).
    Rtl,
}

/// One paragraph of recognised text with its layout direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub direction: Direction,
}

/// Statistics describing a completed conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the input document (all of them were processed).
    pub page_count: usize,
    /// Paragraphs in the assembled output.
    pub paragraph_count: usize,
    /// Wall-clock milliseconds spent rasterising pages.
    pub rasterize_duration_ms: u64,
    /// Wall-clock milliseconds spent in the OCR engine.
    pub recognize_duration_ms: u64,
    /// End-to-end wall-clock milliseconds for the conversion.
    pub total_duration_ms: u64,
}

/// The result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The packaged Word document, ready to write to disk or stream to a client.
    pub docx: Vec<u8>,
    /// The assembled paragraphs, in page order.
    pub paragraphs: Vec<Paragraph>,
    /// Timing and size statistics.
    pub stats: ConversionStats,
}
