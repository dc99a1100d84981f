//! Content quality: length, action verbs, quantified results, keywords and
//! vocabulary diversity

use std::collections::BTreeMap;

use ats_types::{Category, CategoryScore, Issue, QualityBands};

use super::{detail, CategoryScorer, ScoringInput};
use crate::patterns::{
    count_distinct_terms, count_quantifiers, ACTION_VERBS, STOPWORDS, TECH_KEYWORDS,
};

/// Words this short are never flagged as overused
const MIN_TRACKED_WORD_LEN: usize = 5;

#[derive(Debug, Default, Clone)]
pub struct QualityScorer {
    bands: QualityBands,
}

impl QualityScorer {
    pub fn new(bands: QualityBands) -> Self {
        Self { bands }
    }
}

impl CategoryScorer for QualityScorer {
    fn category(&self) -> Category {
        Category::Quality
    }

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore {
        score_quality(input.text, input.word_count, &self.bands)
    }
}

pub fn score_quality(text: &str, word_count: usize, bands: &QualityBands) -> CategoryScore {
    let mut issues = Vec::new();
    let mut details = Vec::new();

    let score = length_points(word_count, bands, &mut issues, &mut details)
        + verb_points(text, bands, &mut issues, &mut details)
        + quantifier_points(text, bands, &mut issues, &mut details)
        + keyword_points(text, bands, &mut issues, &mut details)
        + diversity_points(text, bands, &mut issues, &mut details);

    CategoryScore::new(Category::Quality, score, issues, details)
}

fn length_points(
    words: usize,
    bands: &QualityBands,
    issues: &mut Vec<Issue>,
    details: &mut Vec<String>,
) -> u32 {
    if (bands.ideal_min_words..=bands.ideal_max_words).contains(&words) {
        details.push(detail(true, format!("Ideal length ({} words)", words)));
        6
    } else if (bands.acceptable_min_words..=bands.acceptable_max_words).contains(&words) {
        let (title, advice) = if words < bands.ideal_min_words {
            ("Resume Slightly Short", "Expand on your accomplishments")
        } else {
            ("Resume Slightly Long", "Tighten descriptions")
        };
        issues.push(Issue::info(
            title,
            format!(
                "{} words. {} to land between {} and {} words.",
                words, advice, bands.ideal_min_words, bands.ideal_max_words
            ),
        ));
        details.push(detail(false, format!("Acceptable length ({} words)", words)));
        4
    } else {
        let title = if words < bands.acceptable_min_words {
            "Resume Too Short"
        } else {
            "Resume Too Wordy"
        };
        issues.push(Issue::warning(
            title,
            format!(
                "{} words. Aim for {} to {} words.",
                words, bands.ideal_min_words, bands.ideal_max_words
            ),
        ));
        details.push(detail(false, format!("Length outside recommended range ({} words)", words)));
        2
    }
}

fn verb_points(
    text: &str,
    bands: &QualityBands,
    issues: &mut Vec<Issue>,
    details: &mut Vec<String>,
) -> u32 {
    let verbs = count_distinct_terms(text, ACTION_VERBS);

    if verbs >= bands.verbs_full {
        details.push(detail(true, format!("Strong action verbs ({} found)", verbs)));
        5
    } else if verbs >= bands.verbs_partial {
        issues.push(Issue::info(
            "Add More Action Verbs",
            "Start more bullets with verbs like led, built, reduced or launched.",
        ));
        details.push(detail(false, format!("Some action verbs ({} found)", verbs)));
        3
    } else {
        issues.push(Issue::warning(
            "Weak Action Verbs",
            "Few accomplishment verbs found. Lead each bullet with what you did.",
        ));
        details.push(detail(false, format!("Few action verbs ({} found)", verbs)));
        1
    }
}

fn quantifier_points(
    text: &str,
    bands: &QualityBands,
    issues: &mut Vec<Issue>,
    details: &mut Vec<String>,
) -> u32 {
    let quantified = count_quantifiers(text);

    if quantified >= bands.quantified_full {
        details.push(detail(true, format!("Quantified achievements ({} found)", quantified)));
        4
    } else if quantified > 0 {
        issues.push(Issue::info(
            "Add More Quantifiable Results",
            "Back up more accomplishments with numbers, percentages or dollar amounts.",
        ));
        details.push(detail(false, format!("Some quantified achievements ({} found)", quantified)));
        2
    } else {
        issues.push(Issue::warning(
            "No Quantifiable Achievements",
            "Add measurable results, e.g. \"reduced costs by 20%\" or \"served 10,000 users\".",
        ));
        details.push(detail(false, "No quantified achievements found"));
        0
    }
}

fn keyword_points(
    text: &str,
    bands: &QualityBands,
    issues: &mut Vec<Issue>,
    details: &mut Vec<String>,
) -> u32 {
    let keywords = count_distinct_terms(text, TECH_KEYWORDS);

    if keywords >= bands.tech_full {
        details.push(detail(true, format!("Industry keywords ({} found)", keywords)));
        return 3;
    }

    let (title, points) = if keywords >= bands.tech_partial {
        ("Limited Industry Keywords", 2)
    } else if keywords > 0 {
        ("Few Industry Keywords", 1)
    } else {
        ("No Industry Keywords", 0)
    };
    issues.push(Issue::info(
        title,
        "Mirror the tools and technologies named in the job description.",
    ));
    details.push(detail(false, format!("Industry keywords ({} found)", keywords)));
    points
}

fn diversity_points(
    text: &str,
    bands: &QualityBands,
    issues: &mut Vec<Issue>,
    details: &mut Vec<String>,
) -> u32 {
    let overused = overused_words(text, bands.repeat_limit);

    match overused.len() {
        0 => {
            details.push(detail(true, "Varied vocabulary"));
            2
        }
        n => {
            let description = format!(
                "Words used more than {} times: {}. Vary your wording.",
                bands.repeat_limit,
                overused.join(", ")
            );
            details.push(detail(false, format!("{} overused words", n)));
            if n <= 2 {
                issues.push(Issue::info("Repetitive Language", description));
                1
            } else {
                issues.push(Issue::warning("Repetitive Language", description));
                0
            }
        }
    }
}

/// Non-stopwords of five or more letters occurring more than `limit` times,
/// in alphabetical order
fn overused_words(text: &str, limit: usize) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TRACKED_WORD_LEN)
    {
        let word = word.to_lowercase();
        if !STOPWORDS.contains(&word.as_str()) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > limit)
        .map(|(word, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_types::Severity;
    use pretty_assertions::assert_eq;

    const STRONG_BULLETS: &str = "Led migration to Kubernetes and Docker. \
        Built Rust services behind a Python API. \
        Reduced latency by 40 ms and grew revenue 25%. \
        Launched onboarding for 12,000 customers. \
        Mentored four engineers and optimized deploys.";

    #[test]
    fn test_strong_content_at_ideal_length() {
        let result = score_quality(STRONG_BULLETS, 500, &QualityBands::default());

        assert!(result.score >= 19, "score was {}", result.score);
        assert_eq!(result.score, 20);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_length_bands() {
        let bands = QualityBands::default();
        let mut issues = Vec::new();
        let mut details = Vec::new();

        assert_eq!(length_points(300, &bands, &mut issues, &mut details), 6);
        assert_eq!(length_points(800, &bands, &mut issues, &mut details), 6);
        assert!(issues.is_empty());

        assert_eq!(length_points(250, &bands, &mut issues, &mut details), 4);
        assert_eq!(issues.last().unwrap().severity, Severity::Info);
        assert_eq!(length_points(1000, &bands, &mut issues, &mut details), 4);

        assert_eq!(length_points(150, &bands, &mut issues, &mut details), 2);
        assert_eq!(issues.last().unwrap().severity, Severity::Warning);
        assert_eq!(length_points(1001, &bands, &mut issues, &mut details), 2);
    }

    #[test]
    fn test_plain_text_scores_low() {
        let text = "Worked on some things at a company";
        let result = score_quality(text, 7, &QualityBands::default());

        // length 2 + verbs 1 + quantified 0 + keywords 0 + diversity 2
        assert_eq!(result.score, 5);
        let warnings = result
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        assert_eq!(warnings, 3);
    }

    #[test]
    fn test_overused_words_sorted_and_thresholded() {
        let text = "system ".repeat(6) + &"platform ".repeat(5) + &"about ".repeat(9);
        assert_eq!(overused_words(&text, 5), vec!["system".to_string()]);
    }

    #[test]
    fn test_many_overused_words_is_warning() {
        let text: String = ["alpha ", "bravo ", "charlie "]
            .iter()
            .map(|w| w.repeat(6))
            .collect();
        let mut issues = Vec::new();
        let mut details = Vec::new();

        let points = diversity_points(&text, &QualityBands::default(), &mut issues, &mut details);
        assert_eq!(points, 0);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
