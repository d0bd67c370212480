//! Error types for tab-delimited input files.
//!
//! Every problem found while turning bytes into a [`TabFile`](crate::TabFile)
//! is an [`InputFileError`]. The variants carry the data needed to describe
//! the problem; the message itself is only produced by `Display`.
//!
//! [`IndexOutOfRange`] is kept apart from that family: it is raised by row
//! access on an already valid table and says nothing about the input data.

use std::error::Error;
use std::fmt;

/// Result alias used by the parsing stages.
pub type ParseResult<T> = Result<T, InputFileError>;

/// A data-quality problem in an input file.
///
/// Every variant carries the label (usually the file path) the input was
/// loaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFileError {
    /// None of the candidate encodings could decode the bytes.
    CantDecodeEncoding {
        label: String,
        /// Names of the encodings that were tried, in order.
        tried: Vec<&'static str>,
    },
    /// A control character other than tab or line feed survived decoding.
    InvalidControls {
        label: String,
        codepoint: u32,
        /// 1-based line on which the character was found.
        line: usize,
    },
    /// CR and LF are both present but do not form pure CRLF pairs.
    InconsistentNewlines { label: String },
    /// A row's cell count differs from the first row's.
    InconsistentColumnCounts {
        label: String,
        /// 1-based line number of the offending row.
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl InputFileError {
    /// The label (path) of the input that failed.
    pub fn label(&self) -> &str {
        match self {
            Self::CantDecodeEncoding { label, .. }
            | Self::InvalidControls { label, .. }
            | Self::InconsistentNewlines { label }
            | Self::InconsistentColumnCounts { label, .. } => label,
        }
    }
}

impl fmt::Display for InputFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CantDecodeEncoding { label, tried } => write!(
                f,
                "{label}: can't decode file with any of the encodings [{}]",
                tried.join(", ")
            ),
            Self::InvalidControls {
                label,
                codepoint,
                line,
            } => write!(
                f,
                "{label}: invalid control character U+{codepoint:04X} on line {line}"
            ),
            Self::InconsistentNewlines { label } => {
                write!(f, "{label}: inconsistent newlines (mixed CR, LF and CRLF)")
            }
            Self::InconsistentColumnCounts {
                label,
                line,
                expected,
                found,
            } => write!(
                f,
                "{label}: inconsistent column counts: line {line} has {found} columns, expected {expected}"
            ),
        }
    }
}

impl Error for InputFileError {}

/// Row access outside the visible range of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    /// The index as the caller gave it.
    pub index: isize,
    /// Visible length of the table at the time of access.
    pub len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row index {} out of range for table of {} rows",
            self.index, self.len
        )
    }
}

impl Error for IndexOutOfRange {}
