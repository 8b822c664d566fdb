//! Document assembly: split accumulated text into directed paragraphs.
//!
//! A pure transformation. Paragraph boundaries are blank lines (two
//! consecutive newlines); whitespace-only paragraphs are dropped. A
//! paragraph is laid out right-to-left when it contains *any* character
//! from the Arabic Unicode block. Presence, not majority, decides, so a
//! mostly-Latin line quoting a single Arabic word still flows right-to-left.
//! No other layout inference happens here.

use crate::output::{Direction, Paragraph};

/// Split accumulated page text into paragraphs with a direction each.
///
/// Empty input yields an empty paragraph list, not an error.
pub fn assemble(text: &str) -> Vec<Paragraph> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Paragraph {
            text: p.to_string(),
            direction: direction_of(p),
        })
        .collect()
}

/// Classify a paragraph's layout direction.
fn direction_of(text: &str) -> Direction {
    if text.chars().any(is_arabic) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// Arabic Unicode block, U+0600 through U+06FF.
fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}
