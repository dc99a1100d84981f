//! Formatting: text extractability and table layouts

use ats_types::{Category, CategoryScore, FormattingBands, Issue};

use super::{detail, CategoryScorer, ScoringInput};
use crate::patterns::has_table_layout;

const FULL_POINTS: u32 = 30;
const PARTIAL_POINTS: u32 = 10;

#[derive(Debug, Default, Clone)]
pub struct FormattingScorer {
    bands: FormattingBands,
}

impl FormattingScorer {
    pub fn new(bands: FormattingBands) -> Self {
        Self { bands }
    }
}

impl CategoryScorer for FormattingScorer {
    fn category(&self) -> Category {
        Category::Formatting
    }

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore {
        score_formatting(input.text, &self.bands)
    }
}

/// Score extractability by trimmed character count
///
/// Tables raise an error issue but do not reduce the score.
pub fn score_formatting(text: &str, bands: &FormattingBands) -> CategoryScore {
    let chars = text.trim().chars().count();
    let mut issues = Vec::new();
    let mut details = Vec::new();

    let score = if chars < bands.unreadable_below_chars {
        issues.push(Issue::error(
            "Image-Based or Scanned Resume Detected",
            format!(
                "Only {} characters of text could be extracted. ATS systems cannot read \
                 text inside images; export your resume from a word processor instead.",
                chars
            ),
        ));
        details.push(detail(false, format!("Text extraction failed ({} characters)", chars)));
        0
    } else if chars < bands.full_credit_chars {
        issues.push(Issue::warning(
            "Very Low Text Extraction",
            format!(
                "Only {} characters of text were extracted. Parts of the resume may be \
                 images or unusual fonts.",
                chars
            ),
        ));
        details.push(detail(false, format!("Limited text extracted ({} characters)", chars)));
        PARTIAL_POINTS
    } else {
        details.push(detail(true, format!("Text is fully extractable ({} characters)", chars)));
        FULL_POINTS
    };

    if has_table_layout(text) {
        issues.push(Issue::error(
            "Tables Detected",
            "Tables and multi-column grids are often scrambled by ATS parsers. \
             Use plain lines and bullet points instead.",
        ));
        details.push(detail(false, "Table-like layout detected"));
    } else {
        details.push(detail(true, "No tables detected"));
    }

    CategoryScore::new(Category::Formatting, score, issues, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_types::Severity;
    use pretty_assertions::assert_eq;

    fn filler(chars: usize) -> String {
        "a".repeat(chars)
    }

    #[test]
    fn test_band_boundaries() {
        let bands = FormattingBands::default();

        assert_eq!(score_formatting(&filler(99), &bands).score, 0);
        assert_eq!(score_formatting(&filler(100), &bands).score, 10);
        assert_eq!(score_formatting(&filler(299), &bands).score, 10);
        assert_eq!(score_formatting(&filler(300), &bands).score, 30);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let bands = FormattingBands::default();
        let text = format!("   \n{}\n\n   ", filler(99));
        assert_eq!(score_formatting(&text, &bands).score, 0);
    }

    #[test]
    fn test_tiny_document_reports_scan() {
        let result = score_formatting("hello", &FormattingBands::default());

        assert_eq!(result.score, 0);
        assert_eq!(result.max_score, 30);
        assert_eq!(result.issues[0].title, "Image-Based or Scanned Resume Detected");
        assert_eq!(result.issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_table_error_without_deduction() {
        let text = format!("{}\nName | Role\nJane | Eng\nJohn | PM", filler(300));
        let result = score_formatting(&text, &FormattingBands::default());

        assert_eq!(result.score, 30);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].title, "Tables Detected");
        assert_eq!(result.issues[0].severity, Severity::Error);
    }
}
