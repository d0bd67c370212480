//! Reading and writing tab-delimited files on disk.

use anyhow::Result;
use std::fs;
use tabfile::io::glob::{expand_glob, expand_glob_required};
use tabfile::*;

#[test]
fn read_tsv_labels_with_path() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("holdings.tsv");
    fs::write(&path, "title\tcopies\nDune\t3\n")?;

    let t = read_tsv(&path)?;
    assert_eq!((t.rows(), t.cols()), (2, 2));
    assert_eq!(t.label(), path.display().to_string());
    Ok(())
}

#[test]
fn parse_errors_can_be_downcast() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("ragged.tsv");
    fs::write(&path, "a\tb\nc\n")?;

    let err = read_tsv(&path).unwrap_err();
    let bad = err
        .downcast_ref::<InputFileError>()
        .expect("parse error should be an InputFileError");
    assert!(matches!(bad, InputFileError::InconsistentColumnCounts { line: 2, .. }));
    assert_eq!(bad.label(), path.display().to_string());
    Ok(())
}

#[test]
fn missing_file_has_context() {
    let err = read_tsv("/definitely/not/here.tsv").unwrap_err();
    assert!(err.downcast_ref::<InputFileError>().is_none());
    assert!(format!("{err:#}").contains("open /definitely/not/here.tsv"));
}

#[test]
fn header_option_applies_to_files() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("items.tsv");
    fs::write(&path, "barcode\n3901\n3902\n")?;

    let t = read_tsv_with(&path, &TsvOptions::new().header(true))?;
    assert_eq!(t.len(), 2);
    assert_eq!(t.header_row().map(|r| r[0].as_str()), Some("barcode"));
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn gzipped_file_is_decompressed() -> Result<()> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("export.tsv.gz");
    let mut enc = GzEncoder::new(fs::File::create(&path)?, Compression::default());
    enc.write_all(b"a\tb\r\nc\td\r\n")?;
    enc.finish()?;

    let t = read_tsv(&path)?;
    assert_eq!(t[1], ["c", "d"]);
    Ok(())
}

#[test]
fn glob_reads_in_path_order() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    fs::write(tmp.path().join("b.tsv"), "2\n")?;
    fs::write(tmp.path().join("a.tsv"), "1\n")?;
    fs::write(tmp.path().join("notes.txt"), "skip")?;

    let pattern = format!("{}/*.tsv", tmp.path().display());
    let tables = read_tsv_glob(&pattern, &TsvOptions::default())?;
    assert_eq!(tables.len(), 2);
    assert!(tables[0].0.ends_with("a.tsv"));
    assert_eq!(tables[1].1[0], ["2"]);
    Ok(())
}

#[test]
fn glob_fails_on_first_bad_file() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    fs::write(tmp.path().join("a.tsv"), "ok\n")?;
    fs::write(tmp.path().join("b.tsv"), "x\ny\r\n")?;

    let pattern = format!("{}/*.tsv", tmp.path().display());
    let err = read_tsv_glob(&pattern, &TsvOptions::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InputFileError>(),
        Some(InputFileError::InconsistentNewlines { .. })
    ));
    Ok(())
}

#[test]
fn glob_without_matches() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let pattern = format!("{}/*.tsv", tmp.path().display());
    assert!(expand_glob(&pattern)?.is_empty());
    assert!(expand_glob_required(&pattern).is_err());
    Ok(())
}

#[test]
fn written_tables_read_back() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let src = tmp.path().join("src.tsv");
    fs::write(&src, "id\tname\n1\t\n2\tZoë\n")?;
    let original = read_tsv(&src)?.with_header(true);

    let dst = tmp.path().join("out").join("copy.tsv");
    assert_eq!(write_table(&dst, &original)?, 3);
    assert_eq!(fs::read_to_string(&dst)?, "id\tname\n1\t\n2\tZoë\n");

    let copy = read_tsv(&dst)?;
    assert_eq!(copy.all_rows(), original.all_rows());
    Ok(())
}

#[test]
fn write_rejects_unrepresentable_rows() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("bad.tsv");

    assert!(write_tsv(&path, &[vec!["a", "b"], vec!["c"]]).is_err());
    assert!(write_tsv(&path, &[["a\tb"]]).is_err());
    assert!(write_tsv(&path, &[["line\nbreak"]]).is_err());
    assert!(write_tsv(&path, &[["x"], [""]]).is_err());
    assert!(write_tsv(&path, &[["\u{FEFF}id", "name"]]).is_err());
    assert!(!path.exists());

    assert_eq!(write_tsv(&path, &[["", "x"], ["y", ""]])?, 2);
    Ok(())
}

#[test]
fn byte_order_mark_only_rejected_at_file_start() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("bom.tsv");
    let rows = [["id", "\u{FEFF}name"], ["1", "x"]];
    write_tsv(&path, &rows)?;
    let t = read_tsv(&path)?;
    assert_eq!(t[0], ["id", "\u{FEFF}name"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn write_errors_name_the_path() -> Result<()> {
    // /dev/full accepts the open but fails every write.
    let path = std::path::Path::new("/dev/full");
    if !path.exists() {
        return Ok(());
    }
    let err = write_tsv(path, &[["a", "b"]]).unwrap_err();
    assert!(format!("{err:#}").contains("/dev/full"));
    Ok(())
}
