//! Section boundary detection
//!
//! Every short line is scored against the header rules; lines at or above the
//! threshold become section boundaries, kept in line order without merging
//! duplicates. A section's content is everything strictly between its header
//! and the next one. When nothing qualifies, the whole document becomes a
//! single "Resume Content" section.

use ats_types::{normalize_key, DetectorConfig, HeaderStyle, Line, Section, SectionRegion};
use tracing::{debug, warn};

use crate::headers::{Candidate, HeaderRules};
use crate::table::has_table_pattern;

pub const FALLBACK_SECTION_NAME: &str = "Resume Content";

const REASON_EMPTY: &str = "No content between this header and the next";
const REASON_FORMATTING: &str = "Could not extract content due to formatting issues";
const REASON_TABLE: &str = "Section contains a table that may not be ATS-friendly";
const REASON_IMAGE_BASED: &str =
    "Resume appears to be image-based or unreadable; no selectable text could be extracted";
const REASON_NO_HEADERS: &str = "No section headers detected; content treated as a single block";

/// A line accepted as a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderMatch {
    /// Position in the line slice
    index: usize,
    confidence: i32,
}

/// Slices a line stream into sections
#[derive(Debug, Clone)]
pub struct SectionDetector {
    config: DetectorConfig,
    rules: HeaderRules,
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl SectionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        let rules = HeaderRules::from_config(&config);
        Self { config, rules }
    }

    /// Use a custom rule set instead of the configured one
    pub fn with_rules(config: DetectorConfig, rules: HeaderRules) -> Self {
        Self { config, rules }
    }

    pub fn rules(&self) -> &HeaderRules {
        &self.rules
    }

    /// Detect sections in `lines`; `full_text` is the same content line-joined
    pub fn detect(&self, lines: &[Line], full_text: &str) -> Vec<Section> {
        let headers = self.find_headers(lines);

        if headers.is_empty() {
            warn!(lines = lines.len(), "No section headers detected, using fallback section");
            return vec![self.fallback_section(lines, full_text)];
        }

        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let end = headers.get(i + 1).map_or(lines.len(), |next| next.index);
                self.build_section(lines, *header, end)
            })
            .collect()
    }

    fn find_headers(&self, lines: &[Line]) -> Vec<HeaderMatch> {
        let mean_font_size = mean_font_size(lines);
        let leading = lines.iter().position(|l| !l.is_blank());

        lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let text = line.text.trim();
                let len = text.chars().count();
                if len == 0 || len > self.config.max_header_chars {
                    return None;
                }

                let candidate = Candidate {
                    line,
                    text,
                    previous: index.checked_sub(1).map(|i| &lines[i]),
                    next: lines.get(index + 1),
                    mean_font_size,
                    is_leading: leading == Some(index),
                    config: &self.config,
                };

                let confidence = self.rules.confidence(&candidate);
                if confidence < self.rules.threshold() {
                    return None;
                }

                debug!(
                    line = line.line_number,
                    header = text,
                    confidence,
                    signals = ?self.rules.matched(&candidate),
                    "Accepted section header"
                );
                Some(HeaderMatch { index, confidence })
            })
            .collect()
    }

    fn build_section(&self, lines: &[Line], header: HeaderMatch, end: usize) -> Section {
        let header_line = &lines[header.index];
        let body = &lines[header.index + 1..end];

        let joined = body
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let content = joined.trim();

        let was_extracted = !content.is_empty();
        // lines strictly between this header and the next
        let gap = body.len();
        let has_table = has_table_pattern(content);
        let has_image = !was_extracted && gap > self.config.image_gap_lines;

        let issue_reason = if !was_extracted {
            if gap <= self.config.empty_gap_lines {
                Some(REASON_EMPTY.to_string())
            } else {
                Some(REASON_FORMATTING.to_string())
            }
        } else if has_table {
            Some(REASON_TABLE.to_string())
        } else {
            None
        };

        let name = header_line.text.trim().to_string();

        Section {
            key: normalize_key(&name),
            style: Some(HeaderStyle {
                font_size: header_line.font_size,
                all_caps: header_line.is_all_caps,
                trailing_colon: name.ends_with(':'),
                confidence: header.confidence,
            }),
            name,
            was_extracted,
            content: was_extracted.then(|| content.to_string()),
            line_number: header_line.line_number,
            issue_reason,
            has_table,
            has_image,
            region: section_region(header_line, body),
        }
    }

    fn fallback_section(&self, lines: &[Line], full_text: &str) -> Section {
        let text = full_text.trim();
        let char_count = text.chars().count();
        let word_count = text.split_whitespace().count();

        let image_based = char_count < self.config.fallback_min_chars
            || word_count < self.config.fallback_min_words;

        if image_based {
            warn!(char_count, word_count, "Document appears image-based or unreadable");
        }

        let region = lines
            .iter()
            .position(|l| l.bbox.is_some())
            .and_then(|first| section_region(&lines[first], &lines[first + 1..]));

        Section {
            name: FALLBACK_SECTION_NAME.to_string(),
            key: normalize_key(FALLBACK_SECTION_NAME),
            was_extracted: !image_based,
            content: (!image_based).then(|| text.to_string()),
            line_number: 0,
            issue_reason: Some(if image_based {
                REASON_IMAGE_BASED.to_string()
            } else {
                REASON_NO_HEADERS.to_string()
            }),
            has_table: !image_based && has_table_pattern(text),
            has_image: image_based,
            region,
            style: None,
        }
    }
}

/// Mean font size over non-blank lines with a known size
fn mean_font_size(lines: &[Line]) -> f64 {
    let sizes: Vec<f64> = lines
        .iter()
        .filter(|l| !l.is_blank() && l.font_size > 0.0)
        .map(|l| l.font_size)
        .collect();

    if sizes.is_empty() {
        0.0
    } else {
        sizes.iter().sum::<f64>() / sizes.len() as f64
    }
}

/// Region from the header's origin across the content lines on the header's page
fn section_region(header: &Line, body: &[Line]) -> Option<SectionRegion> {
    let header_box = header.bbox?;

    let content_boxes: Vec<_> = body
        .iter()
        .filter(|l| l.page_index == header.page_index && !l.is_blank())
        .filter_map(|l| l.bbox)
        .collect();

    let extent = content_boxes
        .iter()
        .fold(header_box, |acc, b| acc.union(b));

    let width = if content_boxes.is_empty() {
        header_box.width()
    } else {
        extent.x_max - header_box.x_min
    };

    Some(SectionRegion {
        page_index: header.page_index,
        x: header_box.x_min,
        y: extent.y_min,
        width,
        height: extent.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::lines_from_text;
    use ats_types::BoundingBox;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn plain_lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Line::new(*t, i, 0, 12.0, None))
            .collect()
    }

    fn detect(texts: &[&str]) -> Vec<Section> {
        let lines = plain_lines(texts);
        SectionDetector::default().detect(&lines, &texts.join("\n"))
    }

    #[test]
    fn test_detects_experience_and_education() {
        let sections = detect(&[
            "JOHN DOE",
            "",
            "EXPERIENCE",
            "Software Engineer at Acme, built X",
            "EDUCATION",
            "BS Computer Science, State University",
        ]);

        let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["EXPERIENCE", "EDUCATION"]);
        assert!(sections.iter().all(|s| s.was_extracted));
        assert_eq!(
            sections[0].content.as_deref(),
            Some("Software Engineer at Acme, built X")
        );
        assert_eq!(sections[0].key, "experience");
        assert_eq!(sections[0].line_number, 2);
        assert_eq!(sections[1].line_number, 4);
        assert!(sections[0].issue_reason.is_none());
    }

    #[test]
    fn test_adjacent_headers_report_empty_section() {
        let sections = detect(&[
            "JANE ROE",
            "",
            "SKILLS",
            "",
            "EXPERIENCE",
            "Staff engineer at Initech leading the platform group",
        ]);

        assert_eq!(sections.len(), 2);
        assert!(!sections[0].was_extracted);
        assert_eq!(sections[0].content, None);
        assert_eq!(sections[0].issue_reason.as_deref(), Some(REASON_EMPTY));
        assert!(!sections[0].has_image);
    }

    #[test]
    fn test_wide_empty_gap_suggests_image() {
        let mut texts = vec!["JANE ROE", "", "PROJECTS"];
        texts.extend(std::iter::repeat("").take(6));
        texts.push("EDUCATION");
        texts.push("MSc Physics, Example University, 2015");
        let sections = detect(&texts);

        assert_eq!(sections[0].name, "PROJECTS");
        assert!(!sections[0].was_extracted);
        assert!(sections[0].has_image);
        assert_eq!(sections[0].issue_reason.as_deref(), Some(REASON_FORMATTING));
    }

    #[test]
    fn test_mid_gap_is_formatting_issue_without_image() {
        let sections = detect(&[
            "JANE ROE", "", "AWARDS", "", "", "", "EDUCATION",
            "MSc Physics, Example University, 2015",
        ]);

        assert_eq!(sections[0].issue_reason.as_deref(), Some(REASON_FORMATTING));
        assert!(!sections[0].has_image);
    }

    #[test]
    fn test_table_content_is_flagged() {
        let sections = detect(&[
            "JANE ROE",
            "",
            "SKILLS",
            "Skill | Years",
            "Rust | 5",
            "Go | 3",
        ]);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].was_extracted);
        assert!(sections[0].has_table);
        assert_eq!(sections[0].issue_reason.as_deref(), Some(REASON_TABLE));
    }

    #[test]
    fn test_duplicate_headers_are_not_merged() {
        let sections = detect(&[
            "JANE ROE",
            "",
            "EXPERIENCE",
            "Engineer at Acme building payment systems",
            "",
            "EXPERIENCE",
            "Engineer at Globex building search systems",
        ]);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].key, sections[1].key);
    }

    #[test]
    fn test_fallback_image_based() {
        let sections = detect(&["scan_0001"]);

        assert_eq!(sections.len(), 1);
        let fallback = &sections[0];
        assert_eq!(fallback.name, FALLBACK_SECTION_NAME);
        assert_eq!(fallback.key, "resume_content");
        assert!(!fallback.was_extracted);
        assert!(fallback.has_image);
        assert_eq!(fallback.content, None);
        assert_eq!(fallback.issue_reason.as_deref(), Some(REASON_IMAGE_BASED));
    }

    #[test]
    fn test_fallback_with_readable_text() {
        let text = "i have worked on many systems over the years and enjoy building \
                    reliable software with small teams that care about quality and \
                    users, mostly backend services and some data pipelines";
        let lines = lines_from_text(text);
        let sections = SectionDetector::default().detect(&lines, text);

        assert_eq!(sections.len(), 1);
        assert!(sections[0].was_extracted);
        assert!(!sections[0].has_image);
        assert_eq!(sections[0].content.as_deref(), Some(text));
        assert_eq!(sections[0].issue_reason.as_deref(), Some(REASON_NO_HEADERS));
    }

    #[test]
    fn test_fallback_when_threshold_unreachable() {
        let config = DetectorConfig {
            confidence_threshold: 100,
            ..DetectorConfig::default()
        };
        let texts = [
            "JOHN DOE",
            "",
            "EXPERIENCE",
            "Software Engineer at Acme, built X",
        ];
        let lines = plain_lines(&texts);
        let sections = SectionDetector::new(config).detect(&lines, &texts.join("\n"));

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, FALLBACK_SECTION_NAME);
    }

    #[test]
    fn test_large_font_header_without_keyword() {
        let mut lines = plain_lines(&[
            "Jane Roe",
            "Open Source",
            "Maintainer of a popular parsing library used widely",
        ]);
        lines[1].font_size = 16.0;
        let sections = SectionDetector::default().detect(&lines, "");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Open Source");
        assert_eq!(sections[0].style.as_ref().unwrap().confidence, 6);
    }

    #[test]
    fn test_region_spans_content_lines() {
        let bbox = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Some(BoundingBox {
                x_min: x0,
                y_min: y0,
                x_max: x1,
                y_max: y1,
            })
        };
        let lines = vec![
            Line::new("SUMMARY", 0, 0, 14.0, bbox(72.0, 700.0, 140.0, 714.0)),
            Line::new("Backend engineer with ten years of experience", 1, 0, 11.0, bbox(72.0, 684.0, 380.0, 695.0)),
            Line::new("focused on distributed storage", 2, 0, 11.0, bbox(72.0, 670.0, 300.0, 681.0)),
        ];
        let sections = SectionDetector::default().detect(&lines, "");

        let region = sections[0].region.clone().unwrap();
        assert_eq!(region.x, 72.0);
        assert_eq!(region.y, 670.0);
        assert_eq!(region.width, 308.0);
        assert_eq!(region.height, 44.0);
    }

    #[test]
    fn test_region_without_content_uses_header_width() {
        let header = Line::new(
            "SKILLS",
            0,
            0,
            14.0,
            Some(BoundingBox {
                x_min: 72.0,
                y_min: 700.0,
                x_max: 130.0,
                y_max: 714.0,
            }),
        );
        let region = section_region(&header, &[]).unwrap();
        assert_eq!(region.width, 58.0);
        assert_eq!(region.height, 14.0);
    }

    proptest! {
        #[test]
        fn detection_is_idempotent(texts in proptest::collection::vec("[A-Za-z :|]{0,30}", 0..30)) {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let lines = plain_lines(&refs);
            let full_text = refs.join("\n");
            let detector = SectionDetector::default();

            let first = detector.detect(&lines, &full_text);
            let second = detector.detect(&lines, &full_text);

            prop_assert!(!first.is_empty());
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}
