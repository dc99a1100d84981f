//! Tier-driven recommendations

use ats_types::{Category, CategoryScore, CategoryScores, RecommendationThresholds, Tier};

/// Fixed advice opening the recommendation list for each tier
pub fn tier_template(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Excellent => &[
            "Excellent work! Your resume is highly optimized for ATS systems.",
            "Tailor keywords to each job description to stay ahead.",
            "Keep your resume updated with recent achievements.",
        ],
        Tier::VeryGood => &[
            "Very good! Your resume is well-optimized for most ATS systems.",
            "A few targeted improvements can move it into the excellent range.",
        ],
        Tier::Good => &[
            "Good foundation. Your resume will pass many ATS filters, but there is room to improve.",
            "Focus on the weakest categories below first.",
        ],
        Tier::Fair => &[
            "Your resume needs significant improvements to pass ATS screening.",
            "Priority 1: Make sure all text is selectable and not embedded in images.",
            "Priority 2: Add clear section headers (Experience, Education, Skills).",
            "Priority 3: Include complete contact information.",
            "Priority 4: Add quantifiable achievements with numbers and percentages.",
        ],
        Tier::Poor => &[
            "Critical: Your resume is likely to be rejected by ATS systems.",
            "Convert your resume to a text-based format; scanned images cannot be parsed.",
            "Use a simple single-column layout with standard section headers.",
            "Put your email, phone number and location at the top.",
            "Consider starting from an ATS-friendly resume template.",
        ],
    }
}

fn category_advice(category: Category) -> &'static str {
    match category {
        Category::Contact => {
            "Complete your contact details: email, phone, LinkedIn URL and location."
        }
        Category::Structure => {
            "Use standard section headers such as Experience, Education and Skills."
        }
        Category::Formatting => {
            "Simplify formatting: remove tables and make sure all text is selectable."
        }
        Category::Quality => {
            "Strengthen bullets with action verbs and measurable results."
        }
        Category::Technical => {
            "Keep the resume to one or two pages and use standard bullet characters."
        }
    }
}

/// Percentage below which a category earns a targeted recommendation,
/// or `None` for tiers that only get their template
fn targeting_threshold(tier: Tier, thresholds: &RecommendationThresholds) -> Option<u32> {
    match tier {
        Tier::VeryGood => Some(thresholds.upper_band_threshold),
        Tier::Good => Some(thresholds.middle_band_threshold),
        _ => None,
    }
}

/// Tier template followed by targeted advice, weakest category first
pub fn recommend(
    tier: Tier,
    categories: &CategoryScores,
    thresholds: &RecommendationThresholds,
) -> Vec<String> {
    let mut recommendations: Vec<String> =
        tier_template(tier).iter().map(|s| s.to_string()).collect();

    let Some(threshold) = targeting_threshold(tier, thresholds) else {
        return recommendations;
    };

    let mut weak: Vec<&CategoryScore> = categories
        .iter()
        .filter(|c| c.percentage < threshold)
        .collect();
    // stable: ties keep category order
    weak.sort_by_key(|c| c.percentage);

    recommendations.extend(weak.iter().enumerate().map(|(i, c)| {
        format!(
            "Priority {}: Improve {} ({}%). {}",
            i + 1,
            c.name,
            c.percentage,
            category_advice(c.category)
        )
    }));
    recommendations
}
