//! Layout analysis for resume documents
//!
//! Turns positioned text tokens into reading-order lines and slices the line
//! stream into named sections:
//!
//! - [`lines`]: per-page line reconstruction and the ordered page merge
//! - [`headers`]: weighted header-confidence rules
//! - [`sections`]: section boundary detection with extraction diagnostics
//! - [`table`]: table-like layout detection inside section content
//! - `extract` (feature `pdf`): PDF bytes to page token streams

pub mod error;
#[cfg(feature = "pdf")]
pub mod extract;
pub mod headers;
pub mod lines;
pub mod sections;
pub mod table;

pub use error::ExtractError;
#[cfg(feature = "pdf")]
pub use extract::PdfTokenSource;
pub use headers::{Candidate, HeaderRule, HeaderRules, SECTION_KEYWORDS};
pub use lines::{group_by_page, lines_from_text, merge_pages, LineReconstructor, PageLines};
pub use sections::SectionDetector;
pub use table::has_table_pattern;
