//! Byte decoding with an ordered list of candidate encodings.
//!
//! Library exports are expected to be UTF-8; older ones come out of Windows
//! tools in code page 1252. [`decode`] tries the candidates in order and
//! keeps the first that accepts the whole buffer.
//!
//! No candidate accepts arbitrary bytes. Windows-1252 is decoded strictly:
//! the five byte values the code page leaves undefined reject the buffer, so
//! garbage input surfaces as [`InputFileError::CantDecodeEncoding`] instead
//! of turning silently into text.

use crate::error::{InputFileError, ParseResult};
use tracing::debug;

/// A decoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8; a leading byte-order mark is dropped.
    Utf8,
    /// Windows code page 1252, without the undefined byte values.
    Windows1252,
}

impl Encoding {
    /// Candidates tried by [`decode`], in order.
    pub const DEFAULT_CANDIDATES: [Encoding; 2] = [Encoding::Utf8, Encoding::Windows1252];

    /// Canonical lowercase name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Windows1252 => "windows-1252",
        }
    }

    /// Decode the whole buffer, or `None` if it is not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Encoding::Windows1252 => bytes.iter().map(|&b| windows_1252_char(b)).collect(),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 0x80..=0x9F in code page 1252; `None` marks an undefined byte.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

fn windows_1252_char(b: u8) -> Option<char> {
    match b {
        0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(b - 0x80)],
        // The rest of the code page coincides with Latin-1.
        _ => Some(char::from(b)),
    }
}

/// Text produced by the decoder, tagged with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: Encoding,
}

/// Decode `bytes` with [`Encoding::DEFAULT_CANDIDATES`].
///
/// # Errors
/// [`InputFileError::CantDecodeEncoding`] if no candidate accepts the bytes.
pub fn decode(bytes: &[u8], label: &str) -> ParseResult<DecodedText> {
    decode_with(bytes, &Encoding::DEFAULT_CANDIDATES, label)
}

/// Decode `bytes` with the first of `candidates` that accepts them.
///
/// # Errors
/// [`InputFileError::CantDecodeEncoding`] if no candidate accepts the bytes
/// (including when `candidates` is empty).
pub fn decode_with(bytes: &[u8], candidates: &[Encoding], label: &str) -> ParseResult<DecodedText> {
    for &encoding in candidates {
        match encoding.decode(bytes) {
            Some(text) => return Ok(DecodedText { text, encoding }),
            None => debug!(label, encoding = encoding.name(), "decode failed, trying next encoding"),
        }
    }
    Err(InputFileError::CantDecodeEncoding {
        label: label.to_owned(),
        tried: candidates.iter().map(|e| e.name()).collect(),
    })
}
