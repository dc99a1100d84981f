//! Line reconstruction
//!
//! Tokens arrive in the order the document emitted them, which is not
//! guaranteed to be reading order. Each page is folded independently into a
//! list of [`Line`]s; a line ends when the page ends, when a token carries an
//! embedded line break, or when the next token's baseline drifts past the
//! configured tolerance. Pages are then merged in ascending page order and
//! numbered document-globally by [`merge_pages`], which is the only point
//! where pages have to wait for each other.

use ats_types::{BoundingBox, Line, LineConfig, PageTokens, PositionedToken};
use tracing::debug;

/// Lines of a single page, numbered page-locally
#[derive(Debug, Clone, PartialEq)]
pub struct PageLines {
    pub page_index: usize,
    pub lines: Vec<Line>,
}

/// Folds page token streams into lines
#[derive(Debug, Clone, Default)]
pub struct LineReconstructor {
    config: LineConfig,
}

impl LineReconstructor {
    pub fn new(config: LineConfig) -> Self {
        Self { config }
    }

    /// Reconstruct the lines of one page
    pub fn reconstruct_page(&self, page: &PageTokens) -> PageLines {
        let lines = page
            .tokens
            .iter()
            .fold(
                LineFold::new(page.page_index, self.config.baseline_tolerance),
                LineFold::push,
            )
            .finish();

        debug!(
            page = page.page_index,
            tokens = page.tokens.len(),
            lines = lines.len(),
            "Reconstructed page"
        );

        PageLines {
            page_index: page.page_index,
            lines,
        }
    }

    /// Reconstruct and merge all pages sequentially
    pub fn reconstruct(&self, pages: &[PageTokens]) -> Vec<Line> {
        merge_pages(pages.iter().map(|p| self.reconstruct_page(p)).collect())
    }
}

/// Merge per-page results in ascending page order and assign global line numbers
pub fn merge_pages(mut pages: Vec<PageLines>) -> Vec<Line> {
    pages.sort_by_key(|p| p.page_index);

    pages
        .into_iter()
        .flat_map(|p| p.lines)
        .enumerate()
        .map(|(line_number, mut line)| {
            line.line_number = line_number;
            line
        })
        .collect()
}

/// Split a flat token stream into per-page streams, preserving token order
///
/// Pages run from 0 through the highest page index seen; pages without tokens
/// come back empty so the page count stays exact.
pub fn group_by_page(tokens: Vec<PositionedToken>) -> Vec<PageTokens> {
    let page_count = tokens.iter().map(|t| t.page_index + 1).max().unwrap_or(0);
    let mut pages: Vec<PageTokens> = (0..page_count)
        .map(|page_index| PageTokens::new(page_index, Vec::new()))
        .collect();

    for token in tokens {
        pages[token.page_index].tokens.push(token);
    }

    pages
}

/// Build geometry-less lines from already-extracted text
///
/// Form feeds separate pages. Blank lines are kept so header detection can
/// see the spacing around candidate headers.
pub fn lines_from_text(text: &str) -> Vec<Line> {
    text.split('\x0C')
        .enumerate()
        .flat_map(|(page_index, page)| {
            page.lines()
                .map(move |line| Line::new(line.trim(), 0, page_index, 0.0, None))
        })
        .enumerate()
        .map(|(line_number, mut line)| {
            line.line_number = line_number;
            line
        })
        .collect()
}

/// Accumulator threaded through the token fold of one page
struct LineFold {
    page_index: usize,
    tolerance: f64,
    lines: Vec<Line>,
    buffer: String,
    font_size: f64,
    bbox: Option<BoundingBox>,
    /// Baseline of the last token with a real extent
    baseline: Option<f64>,
}

impl LineFold {
    fn new(page_index: usize, tolerance: f64) -> Self {
        Self {
            page_index,
            tolerance,
            lines: Vec::new(),
            buffer: String::new(),
            font_size: 0.0,
            bbox: None,
            baseline: None,
        }
    }

    fn push(mut self, token: &PositionedToken) -> Self {
        if self.breaks_baseline(token) {
            self.flush();
        }

        let mut segments = token.text.split(|c: char| c == '\n' || c == '\r').peekable();
        while let Some(segment) = segments.next() {
            self.append(segment, token);
            if segments.peek().is_some() {
                self.flush();
            }
        }

        self
    }

    fn finish(mut self) -> Vec<Line> {
        self.flush();
        self.lines
    }

    // Degenerate and whitespace tokens never start a new line on their own.
    fn breaks_baseline(&self, token: &PositionedToken) -> bool {
        if token.is_degenerate() || token.is_whitespace() {
            return false;
        }
        match self.baseline {
            Some(baseline) => (token.y - baseline).abs() > self.tolerance,
            None => false,
        }
    }

    fn append(&mut self, segment: &str, token: &PositionedToken) {
        if segment.trim().is_empty() {
            // whitespace only separates words
            if !segment.is_empty()
                && !self.buffer.is_empty()
                && !self.buffer.ends_with(char::is_whitespace)
            {
                self.buffer.push(' ');
            }
            return;
        }

        self.buffer.push_str(segment);
        self.font_size = self.font_size.max(token.font_size);

        let token_box = BoundingBox::from_token(token);
        self.bbox = Some(match self.bbox {
            Some(current) => current.union(&token_box),
            None => token_box,
        });

        if !token.is_degenerate() {
            self.baseline = Some(token.y);
        }
    }

    fn flush(&mut self) {
        let text = self.buffer.trim();
        if !text.is_empty() {
            let line_number = self.lines.len();
            self.lines.push(Line::new(
                text,
                line_number,
                self.page_index,
                self.font_size,
                self.bbox,
            ));
        }

        self.buffer.clear();
        self.font_size = 0.0;
        self.bbox = None;
        self.baseline = None;
    }
}
