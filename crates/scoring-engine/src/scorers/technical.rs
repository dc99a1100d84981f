//! Technical compatibility: bullet glyphs and page count

use ats_types::{Category, CategoryScore, Issue, TechnicalBands};

use super::{detail, CategoryScorer, ScoringInput};
use crate::patterns::DECORATIVE_BULLETS;

#[derive(Debug, Default, Clone)]
pub struct TechnicalScorer {
    bands: TechnicalBands,
}

impl TechnicalScorer {
    pub fn new(bands: TechnicalBands) -> Self {
        Self { bands }
    }
}

impl CategoryScorer for TechnicalScorer {
    fn category(&self) -> Category {
        Category::Technical
    }

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore {
        score_technical(input.text, input.page_count, &self.bands)
    }
}

pub fn score_technical(text: &str, page_count: usize, bands: &TechnicalBands) -> CategoryScore {
    let mut score = bands.baseline_points;
    let mut issues = Vec::new();
    let mut details = vec![
        detail(true, "Text layer is accessible"),
        detail(true, "No password protection"),
        detail(true, "Single-column reading order"),
    ];

    let bullets = text.chars().filter(|c| DECORATIVE_BULLETS.contains(c)).count();
    if bullets <= bands.decorative_bullets_ok {
        score += bands.bullet_points;
        details.push(detail(true, "Standard bullet characters"));
    } else if bullets <= bands.decorative_bullets_max {
        score += bands.bullet_points / 2;
        issues.push(Issue::info(
            "Decorative Bullet Characters",
            format!(
                "{} decorative symbols found. Some ATS parsers drop or garble them; \
                 prefer plain bullets.",
                bullets
            ),
        ));
        details.push(detail(false, format!("{} decorative symbols", bullets)));
    } else {
        issues.push(Issue::warning(
            "Excessive Decorative Characters",
            format!(
                "{} decorative symbols found. Replace them with standard bullets.",
                bullets
            ),
        ));
        details.push(detail(false, format!("{} decorative symbols", bullets)));
    }

    // a page count of 0 means unknown and is treated as ideal
    if page_count <= bands.ideal_max_pages {
        score += bands.length_points;
        details.push(detail(true, format!("Appropriate length ({} pages)", page_count)));
    } else if page_count <= bands.acceptable_max_pages {
        score += bands.length_points / 2;
        issues.push(Issue::info(
            "Long Resume",
            format!(
                "{} pages. Most recruiters prefer {} pages or fewer.",
                page_count, bands.ideal_max_pages
            ),
        ));
        details.push(detail(false, format!("Long document ({} pages)", page_count)));
    } else {
        issues.push(Issue::warning(
            "Resume Too Long",
            format!(
                "{} pages is too long for most roles. Condense to {} pages.",
                page_count, bands.ideal_max_pages
            ),
        ));
        details.push(detail(false, format!("Too many pages ({})", page_count)));
    }

    CategoryScore::new(Category::Technical, score, issues, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_types::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_two_page_resume() {
        let text = "• Built things\n• Shipped things";
        let result = score_technical(text, 2, &TechnicalBands::default());
        assert_eq!(result.score, 10);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_unknown_page_count_is_ideal() {
        let result = score_technical("", 0, &TechnicalBands::default());
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_page_bands() {
        let bands = TechnicalBands::default();

        let three = score_technical("", 3, &bands);
        assert_eq!(three.score, 9);
        assert_eq!(three.issues[0].severity, Severity::Info);

        let five = score_technical("", 5, &bands);
        assert_eq!(five.score, 8);
        assert_eq!(five.issues[0].severity, Severity::Warning);
        assert_eq!(five.issues[0].title, "Resume Too Long");
    }

    #[test]
    fn test_length_credit_follows_bands() {
        let bands = TechnicalBands {
            baseline_points: 4,
            length_points: 4,
            ..TechnicalBands::default()
        };

        assert_eq!(score_technical("", 1, &bands).score, 10);
        assert_eq!(score_technical("", 3, &bands).score, 8);
        assert_eq!(score_technical("", 4, &bands).score, 6);
    }

    #[test]
    fn test_decorative_bullet_bands() {
        let bands = TechnicalBands::default();

        assert_eq!(score_technical(&"★".repeat(5), 1, &bands).score, 10);
        assert_eq!(score_technical(&"★".repeat(6), 1, &bands).score, 9);
        assert_eq!(score_technical(&"➤".repeat(15), 1, &bands).score, 9);

        let heavy = score_technical(&"➤".repeat(16), 1, &bands);
        assert_eq!(heavy.score, 8);
        assert_eq!(heavy.issues[0].severity, Severity::Warning);
    }
}
