use serde::{Deserialize, Serialize};

/// A positioned text fragment emitted by document decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedToken {
    pub text: String,
    #[serde(default)]
    pub page_index: usize,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub font_size: f64,
}

impl PositionedToken {
    pub fn new(text: impl Into<String>, page_index: usize, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            page_index,
            x,
            y,
            width: 0.0,
            height: 0.0,
            font_size: 0.0,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// True when the token has no extent at all (markers, empty glyph runs)
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered token stream for a single page
///
/// Pages are kept explicitly so that a page without any tokens still counts
/// towards the page total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTokens {
    pub page_index: usize,
    #[serde(default)]
    pub tokens: Vec<PositionedToken>,
}

impl PageTokens {
    pub fn new(page_index: usize, tokens: Vec<PositionedToken>) -> Self {
        Self { page_index, tokens }
    }
}

/// Axis-aligned extent in the document's native coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn from_token(token: &PositionedToken) -> Self {
        Self {
            x_min: token.x,
            y_min: token.y,
            x_max: token.x + token.width,
            y_max: token.y + token.height,
        }
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A reconstructed reading-order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub text: String,
    /// Zero-based, document-global
    pub line_number: usize,
    /// Largest font size among the tokens of the line; 0.0 when unknown
    pub font_size: f64,
    pub is_all_caps: bool,
    pub word_count: usize,
    pub bbox: Option<BoundingBox>,
    pub page_index: usize,
}

impl Line {
    pub fn new(
        text: impl Into<String>,
        line_number: usize,
        page_index: usize,
        font_size: f64,
        bbox: Option<BoundingBox>,
    ) -> Self {
        let text = text.into();
        let is_all_caps = is_all_caps(&text);
        let word_count = text.split_whitespace().count();
        Self {
            text,
            line_number,
            font_size,
            is_all_caps,
            word_count,
            bbox,
            page_index,
        }
    }

    /// Line without geometry, as produced from already-extracted text
    pub fn plain(text: impl Into<String>, line_number: usize) -> Self {
        Self::new(text, line_number, 0, 0.0, None)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Length of the trimmed text in characters
    pub fn char_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

fn is_all_caps(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic()) && !text.chars().any(|c| c.is_lowercase())
}

/// Visual descriptor of a detected header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub font_size: f64,
    pub all_caps: bool,
    pub trailing_colon: bool,
    /// Accumulated header confidence
    pub confidence: i32,
}

/// Area of the page covered by a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRegion {
    pub page_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A detected (or fallback) section of the document
///
/// Consumed by template-suggestion collaborators keyed on `key`, so the
/// serialized field names are part of the external contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Header text as it appears in the document
    pub name: String,
    /// Lowercase key with non-alphanumeric runs collapsed to `_`
    pub key: String,
    pub was_extracted: bool,
    pub content: Option<String>,
    pub line_number: usize,
    pub issue_reason: Option<String>,
    #[serde(default)]
    pub has_table: bool,
    #[serde(default)]
    pub has_image: bool,
    pub region: Option<SectionRegion>,
    pub style: Option<HeaderStyle>,
}

/// Normalize a header into a lookup key: `"Work Experience:"` -> `"work_experience"`
pub fn normalize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    key
}

/// Counts handed to the category scorers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub word_count: usize,
    pub page_count: usize,
    pub char_count: usize,
}

impl DocumentStats {
    pub fn from_text(text: &str, page_count: usize) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            page_count,
            char_count: text.trim().chars().count(),
        }
    }
}
