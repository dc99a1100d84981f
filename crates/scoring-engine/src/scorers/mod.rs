//! Category scorers
//!
//! Each scorer is a pure function of the extracted text, its word count and
//! its page count. Scorers never see each other's results, so they can run in
//! any order or concurrently.

mod contact;
mod formatting;
mod quality;
mod structure;
mod technical;

pub use contact::{score_contact, ContactScorer};
pub use formatting::{score_formatting, FormattingScorer};
pub use quality::{score_quality, QualityScorer};
pub use structure::{score_structure, StructureScorer};
pub use technical::{score_technical, TechnicalScorer};

use ats_types::{Category, CategoryScore};

/// Everything a scorer may look at
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub text: &'a str,
    pub word_count: usize,
    pub page_count: usize,
}

impl<'a> ScoringInput<'a> {
    pub fn new(text: &'a str, word_count: usize, page_count: usize) -> Self {
        Self {
            text,
            word_count,
            page_count,
        }
    }
}

/// Scores one category of ATS compatibility
pub trait CategoryScorer: Send + Sync {
    /// The category this scorer fills in
    fn category(&self) -> Category;

    /// Score the input; the result is unweighted
    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore;
}

/// Check mark prefix for details lines
pub(crate) fn detail(passed: bool, message: impl AsRef<str>) -> String {
    let mark = if passed { '✓' } else { '✗' };
    format!("{} {}", mark, message.as_ref())
}
