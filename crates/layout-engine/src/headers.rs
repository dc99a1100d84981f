//! Header confidence rules
//!
//! A header is not recognized by any single signal. Each rule is a predicate
//! over a candidate line and its neighbours paired with an integer weight;
//! the weights of all matching rules are summed and compared against the
//! configured threshold.

use ats_types::{DetectorConfig, Line};
use lazy_static::lazy_static;
use regex::Regex;

/// Section keywords recognized as header prefixes (case-insensitive)
pub const SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "summary",
    "objective",
    "projects",
    "certifications",
    "awards",
    "publications",
    "languages",
    "volunteer",
    "activities",
    "interests",
    "references",
    "profile",
    "about",
    "contact",
    "technical",
    "professional",
    "work",
    "employment",
    "qualifications",
    "training",
    "licenses",
    "competencies",
    "achievements",
    "honors",
];

lazy_static! {
    /// Capitalized words joined by spaces, ampersands or hyphens, all caps
    static ref CAPS_HEADER: Regex = Regex::new(r"^[A-Z]+(?:[\s&\-]+[A-Z]+)*$").unwrap();
}

/// True when `text` starts with one of [`SECTION_KEYWORDS`]
pub fn starts_with_section_keyword(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.starts_with(k))
}

/// A line under evaluation together with the context the rules need
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub line: &'a Line,
    /// Trimmed line text
    pub text: &'a str,
    pub previous: Option<&'a Line>,
    pub next: Option<&'a Line>,
    /// Mean font size of the non-blank lines; 0.0 when unknown
    pub mean_font_size: f64,
    /// First non-blank line of the document
    pub is_leading: bool,
    pub config: &'a DetectorConfig,
}

/// One weighted signal
#[derive(Clone)]
pub struct HeaderRule {
    pub name: &'static str,
    pub weight: i32,
    predicate: fn(&Candidate<'_>) -> bool,
}

impl HeaderRule {
    pub fn new(name: &'static str, weight: i32, predicate: fn(&Candidate<'_>) -> bool) -> Self {
        Self {
            name,
            weight,
            predicate,
        }
    }

    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        (self.predicate)(candidate)
    }
}

impl std::fmt::Debug for HeaderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderRule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// The full rule set and its acceptance threshold
#[derive(Debug, Clone)]
pub struct HeaderRules {
    rules: Vec<HeaderRule>,
    threshold: i32,
}

impl HeaderRules {
    pub fn new(rules: Vec<HeaderRule>, threshold: i32) -> Self {
        Self { rules, threshold }
    }

    /// Standard rule set with weights taken from configuration
    pub fn from_config(config: &DetectorConfig) -> Self {
        let w = &config.weights;
        Self::new(
            vec![
                HeaderRule::new("large_font", w.large_font, large_font),
                HeaderRule::new("all_caps", w.all_caps, all_caps),
                HeaderRule::new("short_phrase", w.short_phrase, short_phrase),
                HeaderRule::new("caps_pattern", w.caps_pattern, caps_pattern),
                HeaderRule::new("trailing_colon", w.trailing_colon, trailing_colon),
                HeaderRule::new("section_keyword", w.section_keyword, section_keyword),
                HeaderRule::new("blank_before", w.blank_before, blank_before),
                HeaderRule::new("body_after", w.body_after, body_after),
                HeaderRule::new("leading_title", w.leading_title, leading_title),
            ],
            config.confidence_threshold,
        )
    }

    pub fn rules(&self) -> &[HeaderRule] {
        &self.rules
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Summed weight of every matching rule
    pub fn confidence(&self, candidate: &Candidate<'_>) -> i32 {
        self.rules
            .iter()
            .filter(|rule| rule.matches(candidate))
            .map(|rule| rule.weight)
            .sum()
    }

    /// Names of the matching rules, for diagnostics
    pub fn matched(&self, candidate: &Candidate<'_>) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(candidate))
            .map(|rule| rule.name)
            .collect()
    }

    pub fn is_header(&self, candidate: &Candidate<'_>) -> bool {
        self.confidence(candidate) >= self.threshold
    }
}

fn large_font(c: &Candidate<'_>) -> bool {
    c.mean_font_size > 0.0 && c.line.font_size > c.mean_font_size * c.config.font_size_ratio
}

fn all_caps(c: &Candidate<'_>) -> bool {
    c.line.is_all_caps
}

fn short_phrase(c: &Candidate<'_>) -> bool {
    (1..=c.config.max_header_words).contains(&c.line.word_count)
}

fn caps_pattern(c: &Candidate<'_>) -> bool {
    CAPS_HEADER.is_match(c.text)
}

fn trailing_colon(c: &Candidate<'_>) -> bool {
    c.text.ends_with(':')
}

fn section_keyword(c: &Candidate<'_>) -> bool {
    starts_with_section_keyword(c.text)
}

fn blank_before(c: &Candidate<'_>) -> bool {
    c.previous.is_some_and(Line::is_blank)
}

fn body_after(c: &Candidate<'_>) -> bool {
    c.next
        .is_some_and(|next| next.char_len() > c.config.body_line_min_chars)
}

fn leading_title(c: &Candidate<'_>) -> bool {
    c.is_leading
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate<'a>(
        line: &'a Line,
        previous: Option<&'a Line>,
        next: Option<&'a Line>,
        config: &'a DetectorConfig,
    ) -> Candidate<'a> {
        Candidate {
            line,
            text: line.text.trim(),
            previous,
            next,
            mean_font_size: 12.0,
            is_leading: false,
            config,
        }
    }

    #[test]
    fn test_keyword_header_scores_high() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::from_config(&config);
        let blank = Line::plain("", 0);
        let header = Line::new("EXPERIENCE", 1, 0, 12.0, None);
        let body = Line::plain("Software Engineer at Acme, built X", 2);

        let c = candidate(&header, Some(&blank), Some(&body), &config);
        // caps 2 + short 2 + pattern 1 + keyword 3 + blank 1 + body 1
        assert_eq!(rules.confidence(&c), 10);
        assert!(rules.is_header(&c));
    }

    #[test]
    fn test_body_sentence_scores_zero() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::from_config(&config);
        let line = Line::new("Shipped a billing service in Rust", 3, 0, 12.0, None);

        let c = candidate(&line, None, None, &config);
        assert_eq!(rules.confidence(&c), 0);
        assert!(rules.matched(&c).is_empty());
    }

    #[test]
    fn test_large_font_signal() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::from_config(&config);
        let line = Line::new("Portfolio highlights", 0, 0, 16.0, None);

        let c = candidate(&line, None, None, &config);
        assert_eq!(rules.matched(&c), vec!["large_font", "short_phrase"]);
        assert_eq!(rules.confidence(&c), 5);
    }

    #[test]
    fn test_font_ratio_is_strict() {
        let config = DetectorConfig::default();
        let line = Line::new("Almost big", 0, 0, 12.0 * config.font_size_ratio, None);
        let mut c = candidate(&line, None, None, &config);
        assert!(!large_font(&c));

        c.mean_font_size = 11.0;
        assert!(large_font(&c));
    }

    #[test]
    fn test_unknown_font_never_counts_as_large() {
        let config = DetectorConfig::default();
        let line = Line::plain("Projects", 0);
        let mut c = candidate(&line, None, None, &config);
        c.mean_font_size = 0.0;
        assert!(!large_font(&c));
    }

    #[test]
    fn test_colon_and_keyword_prefix() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::from_config(&config);
        let line = Line::plain("Technical Skills:", 4);

        let c = candidate(&line, None, None, &config);
        assert_eq!(
            rules.matched(&c),
            vec!["short_phrase", "trailing_colon", "section_keyword"]
        );
    }

    #[test]
    fn test_leading_title_penalty() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::from_config(&config);
        let name = Line::plain("JOHN DOE", 0);

        let mut c = candidate(&name, None, None, &config);
        assert_eq!(rules.confidence(&c), 5);
        c.is_leading = true;
        assert_eq!(rules.confidence(&c), 2);
        assert!(!rules.is_header(&c));
    }

    #[test]
    fn test_caps_pattern_accepts_joiners() {
        assert!(CAPS_HEADER.is_match("SKILLS & TOOLS"));
        assert!(CAPS_HEADER.is_match("WORK-HISTORY"));
        assert!(!CAPS_HEADER.is_match("Skills"));
        assert!(!CAPS_HEADER.is_match("SKILLS:"));
        assert!(!CAPS_HEADER.is_match("2019 - 2021"));
    }

    #[test]
    fn test_custom_rule_set() {
        let config = DetectorConfig::default();
        let rules = HeaderRules::new(vec![HeaderRule::new("colon", 5, trailing_colon)], 5);
        let line = Line::plain("Anything:", 0);
        assert!(rules.is_header(&candidate(&line, None, None, &config)));
    }
}
