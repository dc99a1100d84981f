//! Document analysis pipeline
//!
//! Pages are reconstructed into lines in parallel, merged in page order, and
//! then section detection and scoring run side by side over the merged
//! result. The page merge is the only point where work has to wait.

use ats_types::{
    AnalysisConfig, AnalysisResult, DocumentStats, Line, PageTokens, PositionedToken, Section,
};
use layout_engine::{
    group_by_page, lines_from_text, merge_pages, LineReconstructor, SectionDetector,
};
use rayon::prelude::*;
use scoring_engine::ScoringEngine;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AnalyzeError;

/// Everything produced for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub stats: DocumentStats,
    pub sections: Vec<Section>,
    pub result: AnalysisResult,
}

/// DocumentAnalyzer entry point
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer {
    config: AnalysisConfig,
    reconstructor: LineReconstructor,
    detector: SectionDetector,
    scoring: ScoringEngine,
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl DocumentAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            reconstructor: LineReconstructor::new(config.lines.clone()),
            detector: SectionDetector::new(config.detector.clone()),
            scoring: ScoringEngine::new(config.scoring.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze per-page token streams
    ///
    /// The page count is the number of streams, empty pages included.
    /// Cancellation is checked before each page and again at the merge.
    pub fn analyze_pages(
        &self,
        pages: &[PageTokens],
        cancel: &CancellationToken,
    ) -> Result<DocumentAnalysis, AnalyzeError> {
        let page_lines = pages
            .par_iter()
            .map(|page| {
                if cancel.is_cancelled() {
                    return Err(AnalyzeError::Cancelled);
                }
                Ok(self.reconstructor.reconstruct_page(page))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }

        let lines = merge_pages(page_lines);
        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(self.finish(&lines, &text, pages.len()))
    }

    /// Analyze a flat token stream spanning any number of pages
    pub fn analyze_tokens(
        &self,
        tokens: Vec<PositionedToken>,
        cancel: &CancellationToken,
    ) -> Result<DocumentAnalysis, AnalyzeError> {
        self.analyze_pages(&group_by_page(tokens), cancel)
    }

    /// Analyze already-extracted text
    ///
    /// Lines carry no geometry, so the font-size header signal is silent and
    /// sections have no region.
    pub fn analyze_text(&self, text: &str, page_count: usize) -> DocumentAnalysis {
        let lines = lines_from_text(text);
        self.finish(&lines, text, page_count)
    }

    /// Extract and analyze PDF bytes
    #[cfg(feature = "pdf")]
    pub fn analyze_pdf(
        &self,
        pdf_bytes: &[u8],
        cancel: &CancellationToken,
    ) -> Result<DocumentAnalysis, AnalyzeError> {
        let pages = layout_engine::PdfTokenSource::extract(pdf_bytes)?;
        self.analyze_pages(&pages, cancel)
    }

    /// Score only, skipping layout analysis
    pub fn score_text(&self, text: &str, page_count: usize) -> AnalysisResult {
        self.scoring.score_text(text, page_count)
    }

    /// Detect sections only
    pub fn detect_sections(&self, lines: &[Line], text: &str) -> Vec<Section> {
        self.detector.detect(lines, text)
    }

    fn finish(&self, lines: &[Line], text: &str, page_count: usize) -> DocumentAnalysis {
        let stats = DocumentStats::from_text(text, page_count);

        // scorers only need the joined text, so they need not wait for sections
        let (sections, result) = rayon::join(
            || self.detector.detect(lines, text),
            || self.scoring.score(text, &stats),
        );

        info!(
            pages = stats.page_count,
            words = stats.word_count,
            sections = sections.len(),
            overall_score = result.overall_score,
            tier = result.tier.label(),
            "Analyzed document"
        );

        DocumentAnalysis {
            stats,
            sections,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_types::Tier;
    use pretty_assertions::assert_eq;

    fn page(index: usize, rows: &[&str]) -> PageTokens {
        let tokens = rows
            .iter()
            .enumerate()
            .map(|(row, text)| {
                PositionedToken::new(*text, index, 72.0, 700.0 - row as f64 * 14.0)
                    .with_size(text.len() as f64 * 6.0, 12.0)
                    .with_font_size(11.0)
            })
            .collect();
        PageTokens::new(index, tokens)
    }

    #[test]
    fn test_pages_merge_in_order_regardless_of_input_order() {
        let analyzer = DocumentAnalyzer::default();
        let pages = vec![
            page(1, &["EDUCATION", "BS Computer Science, State University"]),
            page(0, &["JOHN DOE", "EXPERIENCE", "Software Engineer at Acme, built X"]),
        ];

        let analysis = analyzer
            .analyze_pages(&pages, &CancellationToken::new())
            .unwrap();

        let names: Vec<_> = analysis.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["EXPERIENCE", "EDUCATION"]);
        assert_eq!(analysis.stats.page_count, 2);
    }

    #[test]
    fn test_cancelled_before_start() {
        let analyzer = DocumentAnalyzer::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = analyzer.analyze_pages(&[page(0, &["JOHN DOE"])], &cancel);
        assert!(matches!(result, Err(AnalyzeError::Cancelled)));
    }

    #[test]
    fn test_token_stream_counts_pages_without_tokens() {
        let analyzer = DocumentAnalyzer::default();
        let tokens = vec![
            PositionedToken::new("JANE ROE", 0, 72.0, 720.0).with_size(48.0, 12.0),
            PositionedToken::new("EDUCATION", 2, 72.0, 720.0).with_size(54.0, 12.0),
        ];

        let analysis = analyzer
            .analyze_tokens(tokens, &CancellationToken::new())
            .unwrap();
        assert_eq!(analysis.stats.page_count, 3);
    }

    #[test]
    fn test_empty_document_is_poor_not_an_error() {
        let analyzer = DocumentAnalyzer::default();
        let analysis = analyzer
            .analyze_pages(&[PageTokens::new(0, vec![])], &CancellationToken::new())
            .unwrap();

        assert_eq!(analysis.result.tier, Tier::Poor);
        assert_eq!(analysis.sections.len(), 1);
        assert!(analysis.sections[0].has_image);
    }

    #[test]
    fn test_text_and_scoring_paths_agree() {
        let analyzer = DocumentAnalyzer::default();
        let text = "SKILLS\nRust, SQL, Docker\nEXPERIENCE\nLed the platform team";

        let analysis = analyzer.analyze_text(text, 1);
        assert_eq!(analysis.result, analyzer.score_text(text, 1));
    }
}
