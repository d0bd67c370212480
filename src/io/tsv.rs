//! Reading and writing tab-delimited files.
//!
//! Reading pulls the whole file into memory (decompressing it when the
//! extension or magic bytes say so) and hands the bytes to
//! [`TabFile::from_bytes_with`], labelled with the file path. I/O failures
//! come back with context; parse failures come back as the bare
//! [`InputFileError`](crate::InputFileError) so callers can downcast.
//!
//! ```no_run
//! use tabfile::io::tsv::read_tsv_with;
//! use tabfile::{InputFileError, TsvOptions};
//!
//! match read_tsv_with("holdings.tsv", &TsvOptions::new().header(true)) {
//!     Ok(table) => println!("{} rows x {} cols", table.rows(), table.cols()),
//!     Err(e) => match e.downcast_ref::<InputFileError>() {
//!         Some(bad) => eprintln!("rejected {}: {bad}", bad.label()),
//!         None => return Err(e),
//!     },
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::io::compression::auto_detect_reader;
use crate::io::glob::expand_glob_required;
use crate::options::TsvOptions;
use crate::table::TabFile;
use anyhow::{Context, Result, bail};
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a tab-delimited file with default options.
///
/// # Errors
/// Returns an error if the file cannot be read or fails validation.
pub fn read_tsv(path: impl AsRef<Path>) -> Result<TabFile> {
    read_tsv_with(path, &TsvOptions::default())
}

/// Read a tab-delimited file.
///
/// # Errors
/// Returns an error if the file cannot be read or fails validation.
pub fn read_tsv_with(path: impl AsRef<Path>, opts: &TsvOptions) -> Result<TabFile> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let label = path.display().to_string();
    let table = TabFile::from_bytes_with(&bytes, &label, opts)?;
    Ok(table)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    let mut bytes = Vec::new();
    rdr.read_to_end(&mut bytes)
        .with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    Ok(bytes)
}

/// Read every file matching `pattern`, in sorted path order.
///
/// Stops at the first file that fails; one bad export fails the batch.
///
/// # Errors
/// Returns an error if nothing matches, or any file cannot be read or
/// fails validation.
pub fn read_tsv_glob(pattern: &str, opts: &TsvOptions) -> Result<Vec<(PathBuf, TabFile)>> {
    expand_glob_required(pattern)?
        .into_iter()
        .map(|path| {
            let table = read_tsv_with(&path, opts)?;
            Ok((path, table))
        })
        .collect()
}

/// Write rows as tab-separated, LF-terminated UTF-8.
///
/// Parent directories are created. Rows are checked first so that the file
/// reads back into the same table: every row must have the same non-zero
/// length, no cell may contain a tab or another control character, the
/// first cell may not start with a byte-order mark, and a single-column
/// table may not end in an empty cell.
///
/// # Returns
/// The number of rows written.
///
/// # Errors
/// Returns an error on a row that cannot be represented, or on I/O failure.
pub fn write_tsv<R, S>(path: impl AsRef<Path>, rows: &[R]) -> Result<usize>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    check_writable(rows)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for (i, row) in rows.iter().enumerate() {
        write_row(&mut w, row.as_ref())
            .with_context(|| format!("write row #{} to {}", i + 1, path.display()))?;
    }
    w.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(rows.len())
}

fn write_row<W: Write, S: AsRef<str>>(w: &mut W, cells: &[S]) -> std::io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            w.write_all(b"\t")?;
        }
        w.write_all(cell.as_ref().as_bytes())?;
    }
    w.write_all(b"\n")
}

/// Write every stored row of `table`, hidden header included.
///
/// # Errors
/// See [`write_tsv`].
pub fn write_table(path: impl AsRef<Path>, table: &TabFile) -> Result<usize> {
    write_tsv(path, table.all_rows())
}

fn check_writable<R, S>(rows: &[R]) -> Result<()>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let cols = first.as_ref().len();
    if cols == 0 {
        bail!("row #1 has no cells");
    }
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != cols {
            bail!("row #{} has {} cells, expected {cols}", i + 1, row.len());
        }
        for cell in row {
            if let Some(c) = cell.as_ref().chars().find(|c| c.is_control()) {
                bail!(
                    "row #{}: cell contains control character U+{:04X}",
                    i + 1,
                    u32::from(c)
                );
            }
        }
    }
    // A leading byte-order mark is dropped again when the file is decoded.
    if first.as_ref()[0].as_ref().starts_with('\u{FEFF}') {
        bail!("row #1: first cell starts with a byte-order mark");
    }
    if cols == 1 && rows.last().is_some_and(|r| r.as_ref()[0].as_ref().is_empty()) {
        bail!("single-column table cannot end with an empty cell");
    }
    Ok(())
}
