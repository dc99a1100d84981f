//! Table-like layout detection
//!
//! ATS parsers read tables row by row, which scrambles the content of
//! multi-column layouts. A block of text is considered tabular when it has
//! a run of pipe-delimited rows, repeated tab runs, or several consecutive
//! rows aligned into fixed-width columns.

use lazy_static::lazy_static;
use regex::Regex;

/// Consecutive rows needed before pipes or column gaps count as a table
const MIN_TABLE_ROWS: usize = 3;

lazy_static! {
    static ref TAB_RUN: Regex = Regex::new(r"\t{2,}").unwrap();
    static ref COLUMN_GAP: Regex = Regex::new(r"\S {3,}\S").unwrap();
}

pub fn has_table_pattern(text: &str) -> bool {
    has_pipe_rows(text) || TAB_RUN.is_match(text) || has_columnar_rows(text)
}

fn has_pipe_rows(text: &str) -> bool {
    has_consecutive_rows(text, |row| row.contains('|'))
}

// Two or more wide gaps per row, so "Engineer      2019 - 2021" alone is not a table.
fn has_columnar_rows(text: &str) -> bool {
    has_consecutive_rows(text, |row| COLUMN_GAP.find_iter(row).count() >= 2)
}

fn has_consecutive_rows(text: &str, is_row: impl Fn(&str) -> bool) -> bool {
    let mut run = 0;
    for row in text.lines() {
        if is_row(row) {
            run += 1;
            if run >= MIN_TABLE_ROWS {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
