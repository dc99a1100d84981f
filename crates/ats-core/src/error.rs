use thiserror::Error;

#[cfg(feature = "pdf")]
use layout_engine::ExtractError;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Analysis cancelled")]
    Cancelled,

    #[cfg(feature = "pdf")]
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}
