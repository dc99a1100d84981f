//! Regex patterns and vocabularies used by the category scorers

use lazy_static::lazy_static;
use regex::Regex;

/// Past-tense action verbs that open strong accomplishment bullets
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "built",
    "coordinated",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "engineered",
    "established",
    "executed",
    "generated",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "negotiated",
    "optimized",
    "orchestrated",
    "reduced",
    "resolved",
    "spearheaded",
    "streamlined",
    "transformed",
];

/// Technical and industry keywords ATS filters commonly search for
pub const TECH_KEYWORDS: &[&str] = &[
    "agile",
    "api",
    "aws",
    "azure",
    "c++",
    "ci/cd",
    "css",
    "docker",
    "excel",
    "gcp",
    "git",
    "html",
    "java",
    "javascript",
    "kubernetes",
    "linux",
    "machine learning",
    "mongodb",
    "node.js",
    "postgresql",
    "python",
    "react",
    "rust",
    "salesforce",
    "scrum",
    "sql",
    "tableau",
    "terraform",
    "typescript",
];

/// Headers the structure check accepts at the start of a line
pub const HEADER_KEYWORDS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "education",
    "skills",
    "technical skills",
    "summary",
    "professional summary",
    "objective",
    "profile",
    "projects",
    "certifications",
    "awards",
    "publications",
    "languages",
    "volunteer",
    "references",
];

/// Bullet glyphs that parsers often mangle; `•`, `-` and `*` are standard
pub const DECORATIVE_BULLETS: &[char] = &[
    '★', '☆', '✦', '✧', '❖', '➢', '➤', '►', '▶', '◆', '◇', '■', '□', '●', '○', '✓', '✔', '☐',
    '☑', '⇒', '→',
];

/// Common words excluded from the repetition check
pub const STOPWORDS: &[&str] = &[
    "about", "after", "their", "there", "these", "those", "which", "while", "where", "would",
    "could", "should", "other", "using", "within", "through",
];

/// Two-letter US state and territory codes, as a regex alternation
const US_STATE_CODES: &str = "AL|AK|AZ|AR|CA|CO|CT|DE|DC|FL|GA|HI|ID|IL|IN|IA|KS|KY|LA|ME|MD|MA|\
    MI|MN|MS|MO|MT|NE|NV|NH|NJ|NM|NY|NC|ND|OH|OK|OR|PA|PR|RI|SC|SD|TN|TX|UT|VT|VA|WA|WV|WI|WY";

lazy_static! {
    // Contact
    pub static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap();
    pub static ref PHONE: Regex =
        Regex::new(r"(?:\+?\d{1,3}[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}\b").unwrap();
    pub static ref PROFESSIONAL_NETWORK: Regex =
        Regex::new(r"(?i)\b(?:linkedin\.com/(?:in|pub)/[\w\-]+|github\.com/[\w\-]+)").unwrap();
    pub static ref CITY_STATE: Regex = Regex::new(&format!(
        r"\b[A-Z][a-zA-Z]+(?:[ \-][A-Z][a-zA-Z]+)*,[ \t]*(?:{})\b",
        US_STATE_CODES
    ))
    .unwrap();
    /// ZIP after a state code, or alone at the end of a line
    pub static ref ZIP_CODE: Regex = Regex::new(&format!(
        r"(?m)\b(?:(?:{})[ \t]+\d{{5}}(?:-\d{{4}})?\b|\d{{5}}(?:-\d{{4}})?[ \t]*$)",
        US_STATE_CODES
    ))
    .unwrap();
    pub static ref LOCATION_LABEL: Regex = Regex::new(r"(?i)\b(?:location|address)\b").unwrap();

    // Structure
    pub static ref EXPERIENCE_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:experience|employment|work history|professional background)\b"
    )
    .unwrap();
    pub static ref EDUCATION_KEYWORD: Regex =
        Regex::new(r"(?i)\b(?:education|academic|degree|university|college)\b").unwrap();
    pub static ref SKILLS_KEYWORD: Regex =
        Regex::new(r"(?i)\b(?:skills|competencies|technologies|proficiencies|expertise)\b")
            .unwrap();
    pub static ref SUMMARY_KEYWORD: Regex =
        Regex::new(r"(?i)\b(?:summary|objective|profile|about me)\b").unwrap();
    pub static ref HEADER_LINE: Regex = Regex::new(&format!(
        r"(?mi)^[ \t]*(?:{})\b",
        HEADER_KEYWORDS.join("|")
    ))
    .unwrap();

    // Formatting
    pub static ref PIPE_TABLE: Regex =
        Regex::new(r"(?m)(?:^[^\n]*\|[^\n]*(?:\n|$)){3,}").unwrap();
    pub static ref TAB_TABLE: Regex = Regex::new(r"\t{2,}").unwrap();

    // Quality
    pub static ref QUANTIFIERS: Vec<Regex> = vec![
        // percentages
        Regex::new(r"\b\d+(?:\.\d+)?\s?%").unwrap(),
        // currency
        Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d+)?").unwrap(),
        // "reduced costs by 30"
        Regex::new(
            r"(?i)\b(?:increased|decreased|reduced|improved|grew|boosted|cut|saved|raised|lowered)\b[^.\n]{0,40}?\bby\s+\d"
        )
        .unwrap(),
        // comma-grouped numbers
        Regex::new(r"\b\d{1,3}(?:,\d{3})+\b").unwrap(),
    ];
}

/// True when `term` occurs in `lower` delimited by non-alphanumeric characters
///
/// `lower` must already be lowercased. Works for terms containing
/// punctuation such as `c++` or `ci/cd` where `\b` anchors would not.
pub fn contains_term(lower: &str, term: &str) -> bool {
    lower.match_indices(term).any(|(start, matched)| {
        let before = lower[..start].chars().next_back();
        let after = lower[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Number of distinct vocabulary terms present in `text`
pub fn count_distinct_terms(text: &str, vocabulary: &[&str]) -> usize {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|term| contains_term(&lower, term))
        .count()
}

/// Total quantifiable-result matches across all patterns
pub fn count_quantifiers(text: &str) -> usize {
    QUANTIFIERS.iter().map(|re| re.find_iter(text).count()).sum()
}

pub fn has_table_layout(text: &str) -> bool {
    PIPE_TABLE.is_match(text) || TAB_TABLE.is_match(text)
}
