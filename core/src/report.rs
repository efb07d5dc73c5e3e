//! JSON report of verdicts.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::testing::TestVerdict;

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::ReportError>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum ReportError {
        #[error("Cannot serialize test results to JSON: {0}")]
        Serialize(#[source] serde_json::Error),

        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Cannot write test results to stdout: {0}")]
        Stdout(#[source] io::Error),
    }
}
pub use error::{ReportError, Result};

pub const DEFAULT_INDENT: usize = 4;

/// Renders the verdicts as a pretty-printed JSON array, in execution order.
pub fn to_json(results: &[TestVerdict], indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::with_capacity(128 * (results.len() + 1));
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    results.serialize(&mut ser).map_err(ReportError::Serialize)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_json_file(
    filepath: impl AsRef<Path>,
    results: &[TestVerdict],
    indent: usize,
) -> Result<PathBuf> {
    let filepath = filepath.as_ref();
    let json = self::to_json(results, indent)?;
    log::info!("Writing {} test results to {:?}", results.len(), filepath);

    if let Some(dir) = filepath.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| ReportError::SingleIO("Cannot create dir", dir.to_owned(), e))?;
    }
    fs::write(filepath, json)
        .map_err(|e| ReportError::SingleIO("Cannot write file", filepath.to_owned(), e))?;
    Ok(filepath.to_owned())
}

pub fn print_json(results: &[TestVerdict], indent: usize) -> Result<()> {
    let json = self::to_json(results, indent)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json)
        .and_then(|_| out.flush())
        .map_err(ReportError::Stdout)
}
