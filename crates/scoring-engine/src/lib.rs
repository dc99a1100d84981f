//! ATS compatibility scoring
//!
//! Five independent category scorers run over the extracted text; their
//! results are weighted into an overall 0-100 score, mapped to a tier and
//! accompanied by severity-sorted issues and recommendations.

pub mod aggregate;
pub mod patterns;
pub mod recommend;
pub mod scorers;

use ats_types::{AnalysisResult, CategoryScores, DocumentStats, ScoringConfig};

pub use aggregate::aggregate;
pub use scorers::{
    CategoryScorer, ContactScorer, FormattingScorer, QualityScorer, ScoringInput,
    StructureScorer, TechnicalScorer,
};

/// ScoringEngine entry point
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
    contact: ContactScorer,
    structure: StructureScorer,
    formatting: FormattingScorer,
    quality: QualityScorer,
    technical: TechnicalScorer,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            contact: ContactScorer::new(config.contact.clone()),
            structure: StructureScorer::new(config.structure.clone()),
            formatting: FormattingScorer::new(config.formatting.clone()),
            quality: QualityScorer::new(config.quality.clone()),
            technical: TechnicalScorer::new(config.technical.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// All scorers in category order
    pub fn scorers(&self) -> [&dyn CategoryScorer; 5] {
        [
            &self.contact,
            &self.structure,
            &self.formatting,
            &self.quality,
            &self.technical,
        ]
    }

    /// Unweighted per-category scores
    pub fn score_categories(&self, input: &ScoringInput<'_>) -> CategoryScores {
        CategoryScores {
            contact: self.contact.score(input),
            structure: self.structure.score(input),
            formatting: self.formatting.score(input),
            quality: self.quality.score(input),
            technical: self.technical.score(input),
        }
    }

    /// Score a document whose statistics are already known
    pub fn score(&self, text: &str, stats: &DocumentStats) -> AnalysisResult {
        let input = ScoringInput::new(text, stats.word_count, stats.page_count);
        aggregate(self.score_categories(&input), &self.config)
    }

    /// Score raw text; word count is derived from whitespace splitting
    pub fn score_text(&self, text: &str, page_count: usize) -> AnalysisResult {
        self.score(text, &DocumentStats::from_text(text, page_count))
    }
}
