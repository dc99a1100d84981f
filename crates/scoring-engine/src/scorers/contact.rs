//! Contact information: email, phone, professional profile, location

use ats_types::{Category, CategoryScore, ContactPoints, Issue};

use super::{detail, CategoryScorer, ScoringInput};
use crate::patterns::{CITY_STATE, EMAIL, LOCATION_LABEL, PHONE, PROFESSIONAL_NETWORK, ZIP_CODE};

#[derive(Debug, Default, Clone)]
pub struct ContactScorer {
    points: ContactPoints,
}

impl ContactScorer {
    pub fn new(points: ContactPoints) -> Self {
        Self { points }
    }
}

impl CategoryScorer for ContactScorer {
    fn category(&self) -> Category {
        Category::Contact
    }

    fn score(&self, input: &ScoringInput<'_>) -> CategoryScore {
        score_contact(input.text, &self.points)
    }
}

pub fn score_contact(text: &str, points: &ContactPoints) -> CategoryScore {
    let mut score = 0;
    let mut issues = Vec::new();
    let mut details = Vec::new();

    if EMAIL.is_match(text) {
        score += points.email;
        details.push(detail(true, "Email address found"));
    } else {
        issues.push(Issue::error(
            "Missing Email Address",
            "Recruiters and ATS systems need an email address to reach you. \
             Add a professional email near the top of your resume.",
        ));
        details.push(detail(false, "No email address found"));
    }

    if PHONE.is_match(text) {
        score += points.phone;
        details.push(detail(true, "Phone number found"));
    } else {
        issues.push(Issue::warning(
            "Missing Phone Number",
            "Include a phone number so recruiters can contact you directly.",
        ));
        details.push(detail(false, "No phone number found"));
    }

    if PROFESSIONAL_NETWORK.is_match(text) {
        score += points.network;
        details.push(detail(true, "LinkedIn or GitHub profile found"));
    } else {
        issues.push(Issue::info(
            "No Professional Profile Link",
            "Consider adding your LinkedIn or GitHub profile URL.",
        ));
        details.push(detail(false, "No LinkedIn or GitHub profile found"));
    }

    if has_location(text) {
        score += points.location;
        details.push(detail(true, "Location found"));
    } else {
        issues.push(Issue::info(
            "Location Not Specified",
            "Many ATS filters match on location. Add your city and state.",
        ));
        details.push(detail(false, "No location found"));
    }

    CategoryScore::new(Category::Contact, score, issues, details)
}

fn has_location(text: &str) -> bool {
    CITY_STATE.is_match(text) || ZIP_CODE.is_match(text) || LOCATION_LABEL.is_match(text)
}
