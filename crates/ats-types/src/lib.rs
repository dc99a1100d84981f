//! Shared data model for resume layout analysis and ATS scoring
//!
//! Every crate in the workspace speaks these types: positioned tokens coming
//! out of document decoding, reconstructed lines, detected sections, and the
//! scored analysis result handed to downstream collaborators.

pub mod config;
pub mod score;
pub mod types;

pub use config::{
    AnalysisConfig, CategoryWeights, ConfigError, ContactPoints, DetectorConfig, FormattingBands,
    HeaderWeights, LineConfig, QualityBands, RecommendationThresholds, ScoringConfig,
    StructurePoints, TechnicalBands, TierThresholds,
};
pub use score::{
    percentage_of, AnalysisResult, Category, CategoryScore, CategoryScores, Issue, Severity, Tier,
};
pub use types::{
    normalize_key, BoundingBox, DocumentStats, HeaderStyle, Line, PageTokens, PositionedToken,
    Section, SectionRegion,
};
