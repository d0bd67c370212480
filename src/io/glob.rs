//! Glob expansion for loading batches of export files.
//!
//! Nightly jobs drop one export per branch or per day into a directory;
//! [`expand_glob`] turns a pattern over those into a stable, sorted list so
//! batches are always processed in the same order.

use anyhow::{Context, Result, ensure};
use std::path::PathBuf;

/// Expand `pattern` into the matching regular files, sorted by path.
///
/// Supports the usual `*`, `?`, `**` and `[abc]` syntax. Directories that
/// match are skipped. No match gives an empty vector.
///
/// # Examples
///
/// ```no_run
/// use tabfile::io::glob::expand_glob;
///
/// let exports = expand_glob("exports/2024-*/holdings*.tsv")?;
/// for path in &exports {
///     println!("{}", path.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
/// Returns an error for an invalid pattern or an unreadable directory entry.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    let mut files = entries
        .map(|entry| entry.with_context(|| format!("unreadable match for {pattern}")))
        .filter(|entry| entry.as_ref().map_or(true, |p| p.is_file()))
        .collect::<Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}

/// Like [`expand_glob`], but zero matches is an error.
///
/// Used by [`read_tsv_glob`](crate::io::tsv::read_tsv_glob): a batch that
/// finds no exports is almost always a wrong path, not an empty day.
///
/// # Errors
/// As [`expand_glob`], plus when nothing matches.
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = expand_glob(pattern)?;
    ensure!(!files.is_empty(), "no files found matching pattern: {pattern}");
    Ok(files)
}
