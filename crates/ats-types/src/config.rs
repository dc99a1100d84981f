//! Tunable constants for line reconstruction, header detection and scoring
//!
//! The defaults reproduce the empirically chosen numbers the scoring was
//! calibrated with. They are parameters, not validated constants: every value
//! can be overridden from a TOML file, and partial files fall back to the
//! defaults field by field.
//!
//! ```
//! use ats_types::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_str(
//!     r#"
//!     [detector]
//!     confidence_threshold = 5
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.detector.confidence_threshold, 5);
//! assert_eq!(config.lines.baseline_tolerance, 5.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::score::Category;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Category weights must sum to 1.0 (found {0:.4})")]
    InvalidWeights(f64),

    #[error("Weight for {category} must be a finite value in 0.0..=1.0 (found {value})")]
    WeightOutOfRange { category: &'static str, value: f64 },

    #[error("{category} point credits must add up to {expected} (found {found})")]
    PointsMismatch {
        category: &'static str,
        found: u32,
        expected: u32,
    },
}

/// Root configuration injected into the detector and the scorers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub lines: LineConfig,
    pub detector: DetectorConfig,
    pub scoring: ScoringConfig,
}

impl AnalysisConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        for (category, value) in weights.entries() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { category, value });
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::InvalidWeights(sum));
        }

        let scoring = &self.scoring;
        for (category, found) in [
            (Category::Contact, scoring.contact.total()),
            (Category::Structure, scoring.structure.total()),
            (Category::Technical, scoring.technical.total_points()),
        ] {
            let expected = category.max_score();
            if found != expected {
                return Err(ConfigError::PointsMismatch {
                    category: category.display_name(),
                    found,
                    expected,
                });
            }
        }

        Ok(())
    }
}

/// Line reconstruction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Maximum baseline drift (native units) between tokens of one line
    pub baseline_tolerance: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            baseline_tolerance: 5.0,
        }
    }
}

/// Section boundary detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum accumulated confidence for a line to count as a header
    pub confidence_threshold: i32,
    /// Font size must exceed `mean * font_size_ratio` to count as large
    pub font_size_ratio: f64,
    /// Candidate lines longer than this are never headers
    pub max_header_chars: usize,
    pub max_header_words: usize,
    /// A following line longer than this looks like body text
    pub body_line_min_chars: usize,
    /// Header gaps up to this many lines are reported as genuinely empty
    pub empty_gap_lines: usize,
    /// Failed extraction over a gap larger than this suggests graphical content
    pub image_gap_lines: usize,
    /// Fallback documents shorter than this are treated as image-based
    pub fallback_min_chars: usize,
    pub fallback_min_words: usize,
    pub weights: HeaderWeights,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 4,
            font_size_ratio: 1.1,
            max_header_chars: 50,
            max_header_words: 4,
            body_line_min_chars: 20,
            empty_gap_lines: 2,
            image_gap_lines: 5,
            fallback_min_chars: 50,
            fallback_min_words: 20,
            weights: HeaderWeights::default(),
        }
    }
}

/// Weight of each header signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderWeights {
    pub large_font: i32,
    pub all_caps: i32,
    pub short_phrase: i32,
    pub caps_pattern: i32,
    pub trailing_colon: i32,
    pub section_keyword: i32,
    pub blank_before: i32,
    pub body_after: i32,
    /// Applied to the first non-blank line, which is usually the candidate's name
    pub leading_title: i32,
}

impl Default for HeaderWeights {
    fn default() -> Self {
        Self {
            large_font: 3,
            all_caps: 2,
            short_phrase: 2,
            caps_pattern: 1,
            trailing_colon: 1,
            section_keyword: 3,
            blank_before: 1,
            body_after: 1,
            leading_title: -3,
        }
    }
}

/// Scoring and recommendation parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    pub tiers: TierThresholds,
    pub recommendations: RecommendationThresholds,
    pub formatting: FormattingBands,
    pub quality: QualityBands,
    pub technical: TechnicalBands,
    pub contact: ContactPoints,
    pub structure: StructurePoints,
}

/// Contribution of each category to the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub contact: f64,
    pub structure: f64,
    pub formatting: f64,
    pub quality: f64,
    pub technical: f64,
}

impl CategoryWeights {
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("contact", self.contact),
            ("structure", self.structure),
            ("formatting", self.formatting),
            ("quality", self.quality),
            ("technical", self.technical),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            contact: 0.15,
            structure: 0.25,
            formatting: 0.30,
            quality: 0.20,
            technical: 0.10,
        }
    }
}

/// Lower bound (inclusive) of each tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub excellent: u32,
    pub very_good: u32,
    pub good: u32,
    pub fair: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            very_good: 75,
            good: 60,
            fair: 40,
        }
    }
}

/// Category percentages below these get a targeted recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub upper_band_threshold: u32,
    pub middle_band_threshold: u32,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            upper_band_threshold: 85,
            middle_band_threshold: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingBands {
    pub unreadable_below_chars: usize,
    pub full_credit_chars: usize,
}

impl Default for FormattingBands {
    fn default() -> Self {
        Self {
            unreadable_below_chars: 100,
            full_credit_chars: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityBands {
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    pub acceptable_min_words: usize,
    pub acceptable_max_words: usize,
    pub verbs_full: usize,
    pub verbs_partial: usize,
    pub quantified_full: usize,
    pub tech_full: usize,
    pub tech_partial: usize,
    /// Words used more often than this count as overused
    pub repeat_limit: usize,
}

impl Default for QualityBands {
    fn default() -> Self {
        Self {
            ideal_min_words: 300,
            ideal_max_words: 800,
            acceptable_min_words: 200,
            acceptable_max_words: 1000,
            verbs_full: 5,
            verbs_partial: 3,
            quantified_full: 3,
            tech_full: 4,
            tech_partial: 2,
            repeat_limit: 5,
        }
    }
}

/// Page and bullet bands; the partial band earns half of the full credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalBands {
    pub ideal_max_pages: usize,
    pub acceptable_max_pages: usize,
    pub decorative_bullets_ok: usize,
    pub decorative_bullets_max: usize,
    /// Credit for what extracted text already proves: accessible, unlocked, single column
    pub baseline_points: u32,
    pub bullet_points: u32,
    pub length_points: u32,
}

impl TechnicalBands {
    pub fn total_points(&self) -> u32 {
        self.baseline_points + self.bullet_points + self.length_points
    }
}

impl Default for TechnicalBands {
    fn default() -> Self {
        Self {
            ideal_max_pages: 2,
            acceptable_max_pages: 3,
            decorative_bullets_ok: 5,
            decorative_bullets_max: 15,
            baseline_points: 6,
            bullet_points: 2,
            length_points: 2,
        }
    }
}

/// Contact credits; they must add up to the contact maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPoints {
    pub email: u32,
    pub phone: u32,
    pub network: u32,
    pub location: u32,
}

impl ContactPoints {
    pub fn total(&self) -> u32 {
        self.email + self.phone + self.network + self.location
    }
}

impl Default for ContactPoints {
    fn default() -> Self {
        Self {
            email: 5,
            phone: 4,
            network: 3,
            location: 3,
        }
    }
}

/// Structure credits; they must add up to the structure maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructurePoints {
    pub experience: u32,
    pub education: u32,
    pub skills: u32,
    pub summary: u32,
    pub headers: u32,
}

impl StructurePoints {
    pub fn total(&self) -> u32 {
        self.experience + self.education + self.skills + self.summary + self.headers
    }
}

impl Default for StructurePoints {
    fn default() -> Self {
        Self {
            experience: 8,
            education: 6,
            skills: 5,
            summary: 3,
            headers: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = AnalysisConfig::default();
        assert!((config.scoring.weights.sum() - 1.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = AnalysisConfig::from_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalysisConfig::from_str(
            r#"
            [lines]
            baseline_tolerance = 2.5

            [detector.weights]
            section_keyword = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.lines.baseline_tolerance, 2.5);
        assert_eq!(config.detector.weights.section_keyword, 4);
        assert_eq!(config.detector.weights.all_caps, 2);
        assert_eq!(config.detector.confidence_threshold, 4);
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let result = AnalysisConfig::from_str(
            r#"
            [scoring.weights]
            contact = 0.5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidWeights(_))));
    }

    #[test]
    fn test_rejects_nan_weight() {
        let result = AnalysisConfig::from_str(
            r#"
            [scoring.weights]
            contact = nan
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::WeightOutOfRange {
                category: "contact",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_weight_even_when_sum_is_one() {
        let result = AnalysisConfig::from_str(
            r#"
            [scoring.weights]
            contact = -0.35
            structure = 0.75
            formatting = 0.30
            quality = 0.20
            technical = 0.10
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::WeightOutOfRange {
                category: "contact",
                ..
            })
        ));
    }

    #[test]
    fn test_rebalanced_points_are_accepted() {
        let config = AnalysisConfig::from_str(
            r#"
            [scoring.contact]
            email = 6
            phone = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.contact.total(), 15);
    }

    #[test]
    fn test_rejects_points_over_category_max() {
        let result = AnalysisConfig::from_str(
            r#"
            [scoring.technical]
            baseline_points = 8
            "#,
        );
        match result {
            Err(ConfigError::PointsMismatch {
                found, expected, ..
            }) => {
                assert_eq!(found, 12);
                assert_eq!(expected, 10);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = AnalysisConfig::from_str("[detector\nconfidence_threshold = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AnalysisConfig::from_file("/nonexistent/ats.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
