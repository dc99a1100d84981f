//! Structure: presence of the standard resume sections

use ats_types::{Category, CategoryScore, Issue, StructurePoints};

use super::{detail, CategoryScorer, ScoringInput};
use crate::patterns::{
    EDUCATION_KEYWORD, EXPERIENCE_KEYWORD, HEADER_LINE, SKILLS_KEYWORD, SUMMARY_KEYWORD,
};

#[derive(Debug, Default, Clone)]
pub struct StructureScorer {
    points: StructurePoints,
}

impl StructureScorer {
    pub fn new(points: StructurePoints) -> Self {
        Self { points }
    }
}

impl CategoryScorer for StructureScorer {
    fn category(&self) -> Category {
        Category::Structure
    }

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore {
        score_structure(input.text, &self.points)
    }
}

pub fn score_structure(text: &str, points: &StructurePoints) -> CategoryScore {
    let mut score = 0;
    let mut issues = Vec::new();
    let mut details = Vec::new();

    if EXPERIENCE_KEYWORD.is_match(text) {
        score += points.experience;
        details.push(detail(true, "Experience section found"));
    } else {
        issues.push(Issue::error(
            "Missing Experience Section",
            "ATS systems look for a work experience section. \
             Add one with a clear \"Experience\" header.",
        ));
        details.push(detail(false, "No experience section found"));
    }

    if EDUCATION_KEYWORD.is_match(text) {
        score += points.education;
        details.push(detail(true, "Education section found"));
    } else {
        issues.push(Issue::warning(
            "Missing Education Section",
            "Add an \"Education\" section, even if it only lists certifications or training.",
        ));
        details.push(detail(false, "No education section found"));
    }

    if SKILLS_KEYWORD.is_match(text) {
        score += points.skills;
        details.push(detail(true, "Skills section found"));
    } else {
        issues.push(Issue::warning(
            "Missing Skills Section",
            "A dedicated \"Skills\" section helps ATS keyword matching.",
        ));
        details.push(detail(false, "No skills section found"));
    }

    if SUMMARY_KEYWORD.is_match(text) {
        score += points.summary;
        details.push(detail(true, "Summary or objective found"));
    } else {
        issues.push(Issue::info(
            "No Professional Summary",
            "A short summary at the top gives recruiters quick context.",
        ));
        details.push(detail(false, "No summary or objective found"));
    }

    if HEADER_LINE.is_match(text) {
        score += points.headers;
        details.push(detail(true, "Standard section headers used"));
    } else {
        issues.push(Issue::warning(
            "No Clear Section Headers",
            "Start each section on its own line with a standard header \
             such as Experience, Education or Skills.",
        ));
        details.push(detail(false, "No standard section headers found"));
    }

    CategoryScore::new(Category::Structure, score, issues, details)
}
