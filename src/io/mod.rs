//! File-system adapters around the in-memory parser.

pub mod compression;
pub mod glob;
pub mod tsv;
