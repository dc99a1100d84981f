//! Document inputs accepted by the API and the CLI

use std::path::Path;

use anyhow::Context;
use ats_core::{AnalyzeError, CancellationToken, DocumentAnalysis, DocumentAnalyzer};
use ats_types::{PageTokens, PositionedToken};
use serde::Deserialize;

/// One document in any of the supported shapes
#[derive(Debug, Clone)]
pub enum DocumentInput {
    Pdf(Vec<u8>),
    Pages(Vec<PageTokens>),
    Tokens(Vec<PositionedToken>),
    Text { text: String, page_count: usize },
}

/// JSON token files hold either a flat token list or page streams
///
/// Tokens are tried first: a page object never has the required `text`,
/// while a token would parse as a page with no tokens.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenFile {
    Tokens(Vec<PositionedToken>),
    Pages(Vec<PageTokens>),
}

impl DocumentInput {
    /// Plain text; the page count defaults to the number of form-feed pages
    pub fn text(text: String, page_count: Option<usize>) -> Self {
        let page_count = page_count.unwrap_or_else(|| count_text_pages(&text));
        DocumentInput::Text { text, page_count }
    }

    /// Load a file, picking the shape from its extension
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(DocumentInput::Pdf(bytes))
            }
            Some("json") => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let parsed: TokenFile = serde_json::from_str(&raw).with_context(|| {
                    format!("{} is not a token or page array", path.display())
                })?;
                Ok(match parsed {
                    TokenFile::Pages(pages) => DocumentInput::Pages(pages),
                    TokenFile::Tokens(tokens) => DocumentInput::Tokens(tokens),
                })
            }
            _ => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(DocumentInput::text(text, None))
            }
        }
    }

    pub fn analyze(
        self,
        analyzer: &DocumentAnalyzer,
        cancel: &CancellationToken,
    ) -> Result<DocumentAnalysis, AnalyzeError> {
        match self {
            DocumentInput::Pdf(bytes) => analyzer.analyze_pdf(&bytes, cancel),
            DocumentInput::Pages(pages) => analyzer.analyze_pages(&pages, cancel),
            DocumentInput::Tokens(tokens) => analyzer.analyze_tokens(tokens, cancel),
            DocumentInput::Text { text, page_count } => {
                if cancel.is_cancelled() {
                    return Err(AnalyzeError::Cancelled);
                }
                Ok(analyzer.analyze_text(&text, page_count))
            }
        }
    }
}

/// Non-empty form-feed separated pages, at least one
pub fn count_text_pages(text: &str) -> usize {
    text.split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .count()
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_text_pages() {
        assert_eq!(count_text_pages(""), 1);
        assert_eq!(count_text_pages("one"), 1);
        assert_eq!(count_text_pages("one\x0Ctwo\x0C"), 2);
    }

    #[test]
    fn test_explicit_page_count_wins() {
        match DocumentInput::text("one\x0Ctwo".to_string(), Some(5)) {
            DocumentInput::Text { page_count, .. } => assert_eq!(page_count, 5),
            other => panic!("unexpected input {:?}", other),
        }
    }

    #[test]
    fn test_token_file_shapes() {
        let raw = r#"[{"pageIndex": 0, "tokens": [{"text": "A", "x": 1, "y": 2}]}]"#;
        let pages: TokenFile = serde_json::from_str(raw).unwrap();
        assert!(matches!(pages, TokenFile::Pages(p) if p.len() == 1));

        let tokens: TokenFile =
            serde_json::from_str(r#"[{"text": "A", "x": 1, "y": 2, "pageIndex": 1}]"#).unwrap();
        assert!(matches!(tokens, TokenFile::Tokens(t) if t[0].page_index == 1));
    }

    #[test]
    fn test_cancelled_text_input() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = DocumentInput::text("EXPERIENCE".into(), None)
            .analyze(&DocumentAnalyzer::default(), &cancel);
        assert!(matches!(result, Err(AnalyzeError::Cancelled)));
    }
}
