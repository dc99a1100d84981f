//! Resume analysis pipeline
//!
//! Glues the layout engine and the scoring engine together. Callers hand in
//! page token streams, a flat token stream, raw text or (with the `pdf`
//! feature) PDF bytes and get back document stats, detected sections and the
//! scored [`AnalysisResult`](ats_types::AnalysisResult).
//!
//! # Example
//! ```
//! use ats_core::DocumentAnalyzer;
//!
//! let analyzer = DocumentAnalyzer::default();
//! let analysis = analyzer.analyze_text("JOHN DOE\n\nEXPERIENCE\nEngineer at Acme", 1);
//! assert!(analysis.result.overall_score <= 100);
//! ```

pub mod analyzer;
pub mod error;

pub use analyzer::{DocumentAnalysis, DocumentAnalyzer};
pub use error::AnalyzeError;
pub use tokio_util::sync::CancellationToken;
