//! # tabfile
//!
//! A **strict loader** for tab-delimited bibliographic and inventory exports.
//! Files of uncertain provenance (unknown encoding, stray line endings,
//! ragged rows) are turned into a validated, read-only, rectangular
//! [`TabFile`], or rejected with a precise [`InputFileError`]. Nothing is
//! guessed and nothing is repaired: one problem anywhere rejects the whole
//! file.
//!
//! ## Pipeline
//!
//! Loading runs four stages in order, each consuming the previous one's output:
//!
//! 1. [`decode`](mod@decode) - bytes to text, trying UTF-8 and then Windows-1252
//! 2. [`newline`] - LF, CR or CRLF (but only one of them) rewritten to LF
//! 3. [`rows`] - control-character check, then tab splitting with a
//!    column-count check against the first row
//! 4. [`table`] - the rows wrapped in a [`TabFile`] with a toggleable header
//!
//! ## Quick Start
//!
//! ```
//! use tabfile::TabFile;
//!
//! let mut t = TabFile::from_bytes(b"barcode\tcall_no\n3901\tQA76\n3902\tZ699\n", "items.tsv")?;
//! assert_eq!(t.cols(), 2);
//! assert_eq!(t.rows(), 3);
//!
//! // Hide the header row without copying anything.
//! t.set_header(true);
//! assert_eq!(t.rows(), 2);
//! let barcodes: Vec<&str> = t.iter().map(|r| r[0].as_str()).collect();
//! assert_eq!(barcodes, ["3901", "3902"]);
//! # Ok::<(), tabfile::InputFileError>(())
//! ```
//!
//! ## Files
//!
//! The [`io`] module reads from disk (optionally through gzip, zstd, bzip2
//! or xz) and labels errors with the file path:
//!
//! ```no_run
//! use tabfile::{TsvOptions, read_tsv_with};
//!
//! let table = read_tsv_with("exports/holdings.tsv.gz", &TsvOptions::new().header(true))?;
//! for row in &table {
//!     println!("{row}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Errors
//!
//! | Variant | Raised when |
//! |---|---|
//! | [`CantDecodeEncoding`](InputFileError::CantDecodeEncoding) | no candidate encoding accepts the bytes |
//! | [`InconsistentNewlines`](InputFileError::InconsistentNewlines) | CR and LF are mixed |
//! | [`InvalidControls`](InputFileError::InvalidControls) | a control character other than tab/LF is present |
//! | [`InconsistentColumnCounts`](InputFileError::InconsistentColumnCounts) | a row's width differs from the first row's |
//!
//! Row access outside the visible range is an [`IndexOutOfRange`], which is
//! not part of that family.
//!
//! ## Feature Flags
//!
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`,
//!   `compression-xz` - transparent decompression of input files (all on by
//!   default)

pub mod decode;
pub mod error;
pub mod io;
pub mod newline;
pub mod options;
pub mod rows;
pub mod table;

pub use decode::{DecodedText, Encoding, decode, decode_with};
pub use error::{IndexOutOfRange, InputFileError, ParseResult};
pub use io::tsv::{read_tsv, read_tsv_glob, read_tsv_with, write_table, write_tsv};
pub use newline::{NewlineStyle, detect_newlines, normalize_newlines};
pub use options::TsvOptions;
pub use rows::{Row, check_controls, parse_rows};
pub use table::TabFile;
