//! Splitting normalized text into rectangular rows.

use crate::error::{InputFileError, ParseResult};
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// One line of input, split on tabs.
///
/// A row's length is fixed at construction; all rows of one table share it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Row(Box<[String]>);

impl Row {
    /// The cells of this row.
    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

impl Deref for Row {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl AsRef<[String]> for Row {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Row {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.0.len() == N && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

/// Renders as a tuple literal: `("a", "b")`, `("a",)`.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell:?}")?;
        }
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// Reject control characters other than tab and line feed.
///
/// # Errors
/// [`InputFileError::InvalidControls`] for the first offending character.
pub fn check_controls(text: &str, label: &str) -> ParseResult<()> {
    let mut line = 1;
    for c in text.chars() {
        match c {
            '\n' => line += 1,
            '\t' => {}
            c if c.is_control() => {
                return Err(InputFileError::InvalidControls {
                    label: label.to_owned(),
                    codepoint: u32::from(c),
                    line,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Split LF-normalized `text` into rows of equal length.
///
/// Trailing line feeds are ignored. Empty text yields no rows.
///
/// # Errors
/// [`InputFileError::InconsistentColumnCounts`] at the first row whose cell
/// count differs from the first row's.
pub fn parse_rows(text: &str, label: &str) -> ParseResult<Vec<Row>> {
    let body = text.trim_end_matches('\n');
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    let mut num_cols = None;
    for (idx, line) in body.split('\n').enumerate() {
        let row: Row = line.split('\t').collect();
        let expected = *num_cols.get_or_insert(row.len());
        if row.len() != expected {
            return Err(InputFileError::InconsistentColumnCounts {
                label: label.to_owned(),
                line: idx + 1,
                expected,
                found: row.len(),
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_rows() {
        assert!(parse_rows("", "t").unwrap().is_empty());
        assert!(parse_rows("\n\n", "t").unwrap().is_empty());
    }

    #[test]
    fn single_cell() {
        let rows = parse_rows("a", "t").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], ["a"]);
    }

    #[test]
    fn trailing_newlines_are_ignored() {
        assert_eq!(
            parse_rows("a\tb\nc\td\n", "t").unwrap(),
            parse_rows("a\tb\nc\td", "t").unwrap()
        );
    }

    #[test]
    fn empty_cells_are_kept() {
        let rows = parse_rows("\t\n\t", "t").unwrap();
        assert_eq!(rows[0], ["", ""]);
        assert_eq!(rows[1], ["", ""]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_rows("\t\n\t\t", "r.tsv").unwrap_err();
        assert_eq!(
            err,
            InputFileError::InconsistentColumnCounts {
                label: "r.tsv".into(),
                line: 2,
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn blank_interior_line_is_one_cell() {
        assert!(parse_rows("a\n\nb", "t").is_ok());
        assert!(parse_rows("a\tb\n\nc\td", "t").is_err());
    }

    #[test]
    fn controls_are_reported_with_line() {
        assert!(check_controls("a\tb\nc", "t").is_ok());
        let err = check_controls("ok\nbad\u{7}bell", "c.tsv").unwrap_err();
        assert_eq!(
            err,
            InputFileError::InvalidControls {
                label: "c.tsv".into(),
                codepoint: 7,
                line: 2,
            }
        );
        assert!(check_controls("x\u{85}", "t").is_err());
        assert!(check_controls("\r", "t").is_err());
    }

    #[test]
    fn row_renders_as_tuple() {
        let one: Row = ["a"].into_iter().collect();
        let two: Row = ["a", "b"].into_iter().collect();
        assert_eq!(one.to_string(), r#"("a",)"#);
        assert_eq!(two.to_string(), r#"("a", "b")"#);
    }
}
