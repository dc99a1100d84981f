//! Weighted aggregation of category scores into the final result

use ats_types::{AnalysisResult, CategoryScores, Issue, ScoringConfig, Tier};
use tracing::debug;

use crate::recommend::recommend;

/// Stamp weights, compute the overall score, sort issues and pick the tier
pub fn aggregate(scores: CategoryScores, config: &ScoringConfig) -> AnalysisResult {
    let w = &config.weights;
    let categories = CategoryScores {
        contact: scores.contact.with_weight(w.contact),
        structure: scores.structure.with_weight(w.structure),
        formatting: scores.formatting.with_weight(w.formatting),
        quality: scores.quality.with_weight(w.quality),
        technical: scores.technical.with_weight(w.technical),
    };

    let weighted: f64 = categories
        .iter()
        .map(|c| f64::from(c.percentage) * c.weight)
        .sum();
    let overall_score = weighted.round().clamp(0.0, 100.0) as u32;

    let mut issues: Vec<Issue> = categories
        .iter()
        .flat_map(|c| c.issues.iter().cloned())
        .collect();
    // stable, so issues of equal severity keep category order
    issues.sort_by_key(|issue| issue.severity);

    let tier = Tier::from_score(overall_score, &config.tiers);
    let recommendations = recommend(tier, &categories, &config.recommendations);

    debug!(
        overall_score,
        tier = tier.label(),
        issues = issues.len(),
        "Aggregated ATS score"
    );

    AnalysisResult {
        overall_score,
        categories,
        issues,
        recommendations,
        tier,
    }
}
