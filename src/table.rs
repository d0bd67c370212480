//! The validated, read-only table.
//!
//! A [`TabFile`] owns every parsed [`Row`]. Its header flag is a view
//! setting: when set, row 0 is hidden from [`len`](TabFile::len),
//! [`get`](TabFile::get), [`slice`](TabFile::slice) and iteration, and all
//! indices shift by one. The rows themselves are never moved or copied, so
//! the flag can be flipped any number of times.
//!
//! ```
//! use tabfile::TabFile;
//!
//! let mut t = TabFile::from_bytes(b"title\tyear\nDune\t1965\nEmma\t1815\n", "books.tsv")?;
//! assert_eq!((t.rows(), t.cols()), (3, 2));
//!
//! t.set_header(true);
//! assert_eq!(t.len(), 2);
//! assert_eq!(t.get(0)?[0], "Dune");
//! assert_eq!(t.get(-1)?[0], "Emma");
//! assert_eq!(t.column_index("year"), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::decode::{Encoding, decode_with};
use crate::error::{IndexOutOfRange, InputFileError, ParseResult};
use crate::newline::normalize_newlines;
use crate::options::TsvOptions;
use crate::rows::{Row, check_controls, parse_rows};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use tracing::debug;

/// A rectangular table loaded from tab-delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabFile {
    header: bool,
    cols: usize,
    rows: Vec<Row>,
    #[serde(skip)]
    encoding: Option<Encoding>,
    #[serde(skip)]
    label: String,
}

impl TabFile {
    /// Parse `bytes` with default options; `label` names the input in errors.
    ///
    /// # Errors
    /// Any [`InputFileError`]; no partial table is produced.
    pub fn from_bytes(bytes: &[u8], label: &str) -> ParseResult<Self> {
        Self::from_bytes_with(bytes, label, &TsvOptions::default())
    }

    /// Parse `bytes`: decode, normalize newlines, reject controls, split rows.
    ///
    /// # Errors
    /// Any [`InputFileError`]; no partial table is produced.
    pub fn from_bytes_with(bytes: &[u8], label: &str, opts: &TsvOptions) -> ParseResult<Self> {
        let label = opts.label_or(label);
        let decoded = decode_with(bytes, opts.candidate_encodings(), label)?;
        let mut table = Self::from_text(&decoded.text, label)?;
        table.encoding = Some(decoded.encoding);
        table.header = opts.has_header();
        Ok(table)
    }

    /// Parse already-decoded text. No byte decoding happens, so
    /// [`encoding`](Self::encoding) is `None`.
    ///
    /// # Errors
    /// Any [`InputFileError`] other than `CantDecodeEncoding`.
    pub fn from_text(text: &str, label: &str) -> ParseResult<Self> {
        let text = normalize_newlines(text, label)?;
        check_controls(&text, label)?;
        let rows = parse_rows(&text, label)?;
        let cols = rows.first().map_or(0, |r| r.len());
        debug!(label, rows = rows.len(), cols, "parsed table");
        Ok(Self {
            header: false,
            cols,
            rows,
            encoding: None,
            label: label.to_owned(),
        })
    }

    /// Builder form of [`set_header`](Self::set_header).
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Whether row 0 is currently hidden as a header.
    pub fn header(&self) -> bool {
        self.header
    }

    /// Hide (`true`) or show (`false`) row 0.
    ///
    /// Only the view changes: [`len`](Self::len), indexing and iteration
    /// shift by one row, [`cols`](Self::cols) does not.
    ///
    /// ```
    /// let mut t: tabfile::TabFile = "name\nA\nB".parse()?;
    /// t.set_header(true);
    /// assert_eq!(t[0], ["A"]);
    /// t.set_header(false);
    /// assert_eq!(t[0], ["name"]);
    /// # Ok::<(), tabfile::InputFileError>(())
    /// ```
    pub fn set_header(&mut self, header: bool) {
        self.header = header;
    }

    /// Number of visible rows; same as [`len`](Self::len).
    pub fn rows(&self) -> usize {
        self.len()
    }

    /// Cell count of the first stored row (0 for an empty table).
    ///
    /// Not affected by the header flag.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.visible().len()
    }

    /// True when no row is visible (an empty table, or a header-only one
    /// with the header hidden).
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Encoding the input bytes were decoded with; `None` for tables parsed
    /// from a string.
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// Label (usually the path) the table was loaded under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The visible rows as one slice.
    pub fn visible(&self) -> &[Row] {
        let skip = usize::from(self.header).min(self.rows.len());
        &self.rows[skip..]
    }

    /// Visible row at `index`; negative indices count back from the last
    /// visible row, so `-1` is always the last one.
    ///
    /// # Errors
    /// [`IndexOutOfRange`] outside `-len..len`.
    pub fn get(&self, index: isize) -> Result<&Row, IndexOutOfRange> {
        let visible = self.visible();
        let len = visible.len();
        let pos = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        pos.and_then(|i| visible.get(i))
            .ok_or(IndexOutOfRange { index, len })
    }

    /// Visible rows in `start..end`, with negative bounds counted from the
    /// end. Bounds past either end are clamped; `None` means open.
    pub fn slice(&self, start: Option<isize>, end: Option<isize>) -> &[Row] {
        let visible = self.visible();
        let len = visible.len();
        let start = start.map_or(0, |s| clamp_bound(s, len));
        let end = end.map_or(len, |e| clamp_bound(e, len));
        if start >= end {
            return &[];
        }
        &visible[start..end]
    }

    /// Iterate over the visible rows in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.visible().iter()
    }

    /// Row 0, when the header flag is set.
    pub fn header_row(&self) -> Option<&Row> {
        if self.header { self.rows.first() } else { None }
    }

    /// Position of the header cell equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_row()?.iter().position(|c| c == name)
    }

    /// Visible rows as JSON objects keyed by the header row.
    ///
    /// Returns `None` when no header is set. With duplicate header names the
    /// rightmost column wins.
    pub fn to_json_records(&self) -> Option<Vec<Map<String, Value>>> {
        let names = self.header_row()?;
        let records: Vec<Map<String, Value>> = self
            .iter()
            .map(|row| {
                names
                    .iter()
                    .zip(row.iter())
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect()
            })
            .collect();
        Some(records)
    }

    /// Every stored row, hidden header included.
    pub fn all_rows(&self) -> &[Row] {
        &self.rows
    }

    /// Give up the table and keep every stored row, header included.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

fn clamp_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        bound.unsigned_abs().min(len)
    }
}

impl FromStr for TabFile {
    type Err = InputFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, "<string>")
    }
}

impl Index<usize> for TabFile {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.visible()[index]
    }
}

impl<'a> IntoIterator for &'a TabFile {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `<TabFile header=false ("a", "b"), ("c", "d")>`; lists every stored row,
/// hidden header included.
impl fmt::Display for TabFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<TabFile header={}", self.header)?;
        for (i, row) in self.rows.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{row}")?;
        }
        f.write_str(">")
    }
}
