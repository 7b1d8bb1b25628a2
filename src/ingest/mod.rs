//! Raw table reading.
//!
//! The export is read as untyped rows of strings, positions preserved. The
//! first record is the corrupted header: it is consumed only to learn how
//! many physical columns the file carries and is never treated as data.

pub mod coerce;

use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{info, instrument, warn};

use crate::error::LoadError;
use crate::schema;

/// An export read into memory, untyped.
#[derive(Debug)]
pub struct RawTable {
    /// Data rows in file order, one `Vec<String>` per row. Rows keep whatever
    /// field count the file gave them; realignment pads or truncates later.
    pub rows: Vec<Vec<String>>,
    /// Physical column count, taken from the header artifact row.
    pub column_count: usize,
}

/// Read the alumni export at `path`.
///
/// Any I/O or CSV parse problem is a [`LoadError::SourceUnavailable`]: the
/// whole run aborts rather than loading a partial table.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_raw_table<P: AsRef<Path>>(path: P) -> Result<RawTable, LoadError> {
    let path = path.as_ref();
    let unavailable = |source: csv::Error| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(&unavailable)?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(&unavailable)?,
        None => {
            return Err(unavailable(csv::Error::from(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file has no header row",
            ))))
        }
    };

    let column_count = header.len();
    if column_count != schema::EXPECTED_COLUMNS {
        // Rows are still padded/truncated per row; this is the operator's
        // signal that the upstream layout may have drifted.
        warn!(
            column_count,
            expected = schema::EXPECTED_COLUMNS,
            "physical column count does not match the declared schema"
        );
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(&unavailable)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    info!(rows = rows.len(), column_count, "raw table read");
    Ok(RawTable { rows, column_count })
}
