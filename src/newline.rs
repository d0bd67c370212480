//! Newline convention checks.
//!
//! Input may use LF, CR or CRLF line endings, but only one of them. Any mix
//! is rejected with [`InputFileError::InconsistentNewlines`]; what comes out
//! of [`normalize_newlines`] uses LF only.

use crate::error::{InputFileError, ParseResult};
use std::borrow::Cow;
use tracing::trace;

/// Line-ending convention found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineStyle {
    /// No line breaks at all.
    None,
    Lf,
    Cr,
    CrLf,
    /// More than one convention, or stray CR/LF next to CRLF pairs.
    Mixed,
}

/// Classify the newline convention used by `text`.
pub fn detect_newlines(text: &str) -> NewlineStyle {
    let has_cr = text.contains('\r');
    let has_lf = text.contains('\n');
    match (has_cr, has_lf) {
        (false, false) => NewlineStyle::None,
        (false, true) => NewlineStyle::Lf,
        (true, false) => NewlineStyle::Cr,
        (true, true) if is_pure_crlf(text.as_bytes()) => NewlineStyle::CrLf,
        (true, true) => NewlineStyle::Mixed,
    }
}

/// Every CR is followed by LF and every LF is preceded by CR.
fn is_pure_crlf(bytes: &[u8]) -> bool {
    bytes.iter().enumerate().all(|(i, &b)| match b {
        b'\r' => bytes.get(i + 1) == Some(&b'\n'),
        b'\n' => i > 0 && bytes[i - 1] == b'\r',
        _ => true,
    })
}

/// Rewrite `text` to LF-only line endings.
///
/// Text without CR is returned borrowed and unchanged.
///
/// # Errors
/// [`InputFileError::InconsistentNewlines`] if the text mixes conventions.
pub fn normalize_newlines<'a>(text: &'a str, label: &str) -> ParseResult<Cow<'a, str>> {
    let style = detect_newlines(text);
    trace!(label, ?style, "newline style");
    match style {
        NewlineStyle::None | NewlineStyle::Lf => Ok(Cow::Borrowed(text)),
        NewlineStyle::Cr => Ok(Cow::Owned(text.replace('\r', "\n"))),
        NewlineStyle::CrLf => Ok(Cow::Owned(text.replace("\r\n", "\n"))),
        NewlineStyle::Mixed => Err(InputFileError::InconsistentNewlines {
            label: label.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_style() {
        assert_eq!(detect_newlines("abc"), NewlineStyle::None);
        assert_eq!(detect_newlines("a\nb\n"), NewlineStyle::Lf);
        assert_eq!(detect_newlines("a\rb\r"), NewlineStyle::Cr);
        assert_eq!(detect_newlines("a\r\nb\r\n"), NewlineStyle::CrLf);
        assert_eq!(detect_newlines("a\r\nb\n"), NewlineStyle::Mixed);
        assert_eq!(detect_newlines("a\r\nb\rc\r\n"), NewlineStyle::Mixed);
        assert_eq!(detect_newlines("\na\r\n"), NewlineStyle::Mixed);
    }

    #[test]
    fn lf_text_is_borrowed() {
        let out = normalize_newlines("a\nb", "t").unwrap();
        assert!(matches!(out, Cow::Borrowed("a\nb")));
    }

    #[test]
    fn cr_and_crlf_become_lf() {
        assert_eq!(normalize_newlines("a\rb\r", "t").unwrap(), "a\nb\n");
        assert_eq!(normalize_newlines("a\r\nb\r\n", "t").unwrap(), "a\nb\n");
        assert_eq!(normalize_newlines("\r\n\r\n", "t").unwrap(), "\n\n");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for text in ["a\nb\n", "a\rb", "a\r\nb\r\n", "plain"] {
            let once = normalize_newlines(text, "t").unwrap().into_owned();
            let twice = normalize_newlines(&once, "t").unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn mixed_input_is_rejected() {
        let err = normalize_newlines("first line\nsecond line\r\nthird line\rfourth", "m.tsv")
            .unwrap_err();
        assert_eq!(
            err,
            InputFileError::InconsistentNewlines {
                label: "m.tsv".into()
            }
        );
    }
}
