//! Loader configuration.

use crate::decode::Encoding;

/// How a tab-delimited input is loaded.
///
/// ```
/// use tabfile::{Encoding, TsvOptions};
///
/// let opts = TsvOptions::new()
///     .header(true)
///     .encodings(vec![Encoding::Utf8]);
/// assert!(opts.has_header());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvOptions {
    encodings: Vec<Encoding>,
    header: bool,
    label: Option<String>,
}

impl Default for TsvOptions {
    fn default() -> Self {
        Self {
            encodings: Encoding::DEFAULT_CANDIDATES.to_vec(),
            header: false,
            label: None,
        }
    }
}

impl TsvOptions {
    /// UTF-8 then Windows-1252, no header, errors labelled with the path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate encodings, tried in the given order.
    ///
    /// An empty list makes every load fail with
    /// [`InputFileError::CantDecodeEncoding`](crate::InputFileError::CantDecodeEncoding).
    #[must_use]
    pub fn encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// Initial value of the table's header flag.
    #[must_use]
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Label used in error messages instead of the file path.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Encodings to try, in order.
    pub fn candidate_encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Header flag given to loaded tables.
    pub fn has_header(&self) -> bool {
        self.header
    }

    /// The configured label, or `fallback` when none was set.
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }
}
