use thiserror::Error;

/// Failures acquiring a token stream from a source document
///
/// These are the only fatal errors of the analysis: near-empty or image-only
/// documents are not errors and flow through as low scores instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("PDF extraction failed: {0}")]
    ExtractionFailed(String),
}
