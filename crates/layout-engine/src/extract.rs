//! PDF to token stream
//!
//! `pdf-extract` yields plain text with form feeds between pages but no glyph
//! positions. Each text line is turned into one token on a descending
//! baseline so the rest of the pipeline sees a regular token stream. Font
//! sizes are unknown on this path, so the large-font header signal never
//! fires for PDFs read this way.
//!
//! # Example
//! ```no_run
//! use layout_engine::{ExtractError, PdfTokenSource};
//!
//! fn pages(pdf_bytes: &[u8]) -> Result<(), ExtractError> {
//!     let pages = PdfTokenSource::extract(pdf_bytes)?;
//!     println!("Extracted {} pages", pages.len());
//!     Ok(())
//! }
//! ```

use ats_types::{PageTokens, PositionedToken};
use pdf_extract::extract_text_from_mem;
use tracing::debug;

use crate::error::ExtractError;

/// US Letter height in points
const PAGE_TOP: f64 = 792.0;
const MARGIN: f64 = 72.0;
const LINE_HEIGHT: f64 = 14.0;
const GLYPH_HEIGHT: f64 = 12.0;
const GLYPH_WIDTH: f64 = 6.0;

/// Reads PDF bytes into per-page token streams
pub struct PdfTokenSource;

impl PdfTokenSource {
    /// Extract page token streams from PDF bytes
    ///
    /// # Errors
    /// - `ExtractError::PasswordProtected` - The PDF requires a password
    /// - `ExtractError::InvalidPdf` - The PDF is malformed or corrupted
    /// - `ExtractError::ExtractionFailed` - Other extraction failures
    ///
    /// Near-empty output is not an error: scanned resumes come back as pages
    /// with few or no tokens and are scored accordingly.
    pub fn extract(pdf_bytes: &[u8]) -> Result<Vec<PageTokens>, ExtractError> {
        let raw_text = extract_text_from_mem(pdf_bytes).map_err(|e| {
            let message = e.to_string();
            let lower = message.to_lowercase();

            if lower.contains("encrypted") || lower.contains("password") {
                ExtractError::PasswordProtected
            } else if lower.contains("invalid")
                || lower.contains("malformed")
                || lower.contains("corrupt")
            {
                ExtractError::InvalidPdf(message)
            } else {
                ExtractError::ExtractionFailed(message)
            }
        })?;

        let pages = Self::tokens_from_text(&raw_text);
        debug!(pages = pages.len(), chars = raw_text.len(), "Extracted PDF text");
        Ok(pages)
    }

    /// Synthesize page token streams from form-feed separated text
    pub fn tokens_from_text(text: &str) -> Vec<PageTokens> {
        let mut page_texts: Vec<&str> = text.split('\x0C').collect();

        // a trailing form feed closes the last page rather than opening a new one
        if page_texts.len() > 1 && page_texts.last().is_some_and(|p| p.trim().is_empty()) {
            page_texts.pop();
        }

        page_texts
            .into_iter()
            .enumerate()
            .map(|(page_index, page_text)| {
                let tokens = page_text
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| !line.trim().is_empty())
                    .map(|(row, line)| {
                        let line = line.trim_end();
                        PositionedToken::new(
                            line,
                            page_index,
                            MARGIN,
                            PAGE_TOP - MARGIN - row as f64 * LINE_HEIGHT,
                        )
                        .with_size(line.chars().count() as f64 * GLYPH_WIDTH, GLYPH_HEIGHT)
                    })
                    .collect();
                PageTokens::new(page_index, tokens)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::LineReconstructor;

    #[test]
    fn test_tokens_from_text_splits_pages() {
        let pages = PdfTokenSource::tokens_from_text("JANE ROE\nEngineer\x0CEDUCATION\n\x0C");

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].tokens.len(), 2);
        assert_eq!(pages[1].tokens[0].text, "EDUCATION");
        assert_eq!(pages[1].tokens[0].page_index, 1);
    }

    #[test]
    fn test_blank_lines_keep_vertical_spacing() {
        let pages = PdfTokenSource::tokens_from_text("A\n\nB");
        let tokens = &pages[0].tokens;

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].y - tokens[1].y, 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn test_synthesized_tokens_reconstruct_to_lines() {
        let pages = PdfTokenSource::tokens_from_text("SKILLS\nRust, Go, SQL\x0CEDUCATION");
        let lines = LineReconstructor::default().reconstruct(&pages);

        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["SKILLS", "Rust, Go, SQL", "EDUCATION"]);
        assert_eq!(lines[2].page_index, 1);
    }

    #[test]
    fn test_empty_text_is_one_empty_page() {
        let pages = PdfTokenSource::tokens_from_text("");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].tokens.is_empty());
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let result = PdfTokenSource::extract(b"definitely not a pdf");
        assert!(result.is_err());
    }
}
