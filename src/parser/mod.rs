//! Parser module — one pass per account table.
//!
//! The group pass must finish before the passwd pass starts: user records are
//! validated against the group ids it collects.

pub mod group;
pub mod passwd;

use crate::error::AccountError;
use std::io::BufRead;
use std::path::Path;

/// Field separator of both tables.
pub const DELIMITER: char = ':';

/// Feed every line of `reader` to `visit` as `(line_number, fields)`.
///
/// Line numbers are 1-based. Trailing whitespace (including a CR) is dropped
/// before splitting. The first error from either the reader or `visit` stops
/// the scan.
pub(crate) fn scan_records<R, F>(path: &Path, reader: R, mut visit: F) -> Result<(), AccountError>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<(), AccountError>,
{
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AccountError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let fields: Vec<&str> = line.trim_end().split(DELIMITER).collect();
        visit(idx + 1, &fields)?;
    }
    Ok(())
}

pub(crate) fn malformed(path: &Path, line: usize, expected: usize, found: usize) -> AccountError {
    AccountError::MalformedRecord {
        path: path.to_path_buf(),
        line,
        expected,
        found,
    }
}
