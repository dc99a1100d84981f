use serde::{Deserialize, Serialize};

use crate::config::TierThresholds;

/// Severity of an issue; the declaration order is the priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A problem found while scoring a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Issue {
    pub fn new(severity: Severity, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, description)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, description)
    }
}

/// The five compatibility dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Contact,
    Structure,
    Formatting,
    Quality,
    Technical,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Contact,
        Category::Structure,
        Category::Formatting,
        Category::Quality,
        Category::Technical,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Contact => "Contact Information",
            Category::Structure => "Structure & Sections",
            Category::Formatting => "Formatting & Readability",
            Category::Quality => "Content Quality",
            Category::Technical => "Technical Compatibility",
        }
    }

    pub fn max_score(&self) -> u32 {
        match self {
            Category::Contact => 15,
            Category::Structure => 25,
            Category::Formatting => 30,
            Category::Quality => 20,
            Category::Technical => 10,
        }
    }
}

/// `round(100 * score / max)`, 0 when `max` is 0
pub fn percentage_of(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (100.0 * f64::from(score) / f64::from(max_score)).round() as u32
}

/// Bounded sub-score for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    /// Contribution to the overall score, stamped by the aggregator
    pub weight: f64,
    pub issues: Vec<Issue>,
    /// Human-readable pass/fail lines
    pub details: Vec<String>,
}

impl CategoryScore {
    /// Build a score for `category`, clamping `score` into `0..=max`
    pub fn new(category: Category, score: u32, issues: Vec<Issue>, details: Vec<String>) -> Self {
        let max_score = category.max_score();
        let score = score.min(max_score);
        Self {
            category,
            name: category.display_name().to_string(),
            score,
            max_score,
            percentage: percentage_of(score, max_score),
            weight: 0.0,
            issues,
            details,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// One score per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub contact: CategoryScore,
    pub structure: CategoryScore,
    pub formatting: CategoryScore,
    pub quality: CategoryScore,
    pub technical: CategoryScore,
}

impl CategoryScores {
    /// Categories in emission order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        [
            &self.contact,
            &self.structure,
            &self.formatting,
            &self.quality,
            &self.technical,
        ]
        .into_iter()
    }

    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::Contact => &self.contact,
            Category::Structure => &self.structure,
            Category::Formatting => &self.formatting,
            Category::Quality => &self.quality,
            Category::Technical => &self.technical,
        }
    }
}

/// Coarse quality label derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl Tier {
    pub fn from_score(score: u32, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.excellent {
            Tier::Excellent
        } else if score >= thresholds.very_good {
            Tier::VeryGood
        } else if score >= thresholds.good {
            Tier::Good
        } else if score >= thresholds.fair {
            Tier::Fair
        } else {
            Tier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::VeryGood => "very-good",
            Tier::Good => "good",
            Tier::Fair => "fair",
            Tier::Poor => "poor",
        }
    }
}

/// Final output of an analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0..=100
    pub overall_score: u32,
    pub categories: CategoryScores,
    /// All category issues, errors first
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub tier: Tier,
}

impl AnalysisResult {
    /// Generate a text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "ATS Compatibility Score: {}/100 ({})\n",
            self.overall_score,
            self.tier.label()
        ));
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        for category in self.categories.iter() {
            output.push_str(&format!(
                "{}: {}/{} ({}%)\n",
                category.name, category.score, category.max_score, category.percentage
            ));
            for detail in &category.details {
                output.push_str(&format!("    {}\n", detail));
            }
        }

        if !self.issues.is_empty() {
            output.push_str("\nIssues:\n");
            output.push_str(&"-".repeat(40));
            output.push('\n');

            for issue in &self.issues {
                let marker = match issue.severity {
                    Severity::Error => "✗ ERROR",
                    Severity::Warning => "⚠ WARN",
                    Severity::Info => "- INFO",
                };
                output.push_str(&format!("{} {}\n", marker, issue.title));
                output.push_str(&format!("    {}\n", issue.description));
            }
        }

        if !self.recommendations.is_empty() {
            output.push_str("\nRecommendations:\n");
            output.push_str(&"-".repeat(40));
            output.push('\n');

            for (i, rec) in self.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, rec));
            }
        }

        output
    }
}
