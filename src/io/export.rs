//! CSV export and import for demand tables.
//!
//! The layout has an unnamed timestamp column followed by one column per
//! building category:
//!
//! ```text
//! ,efh,mfh,ghd
//! 2010-01-01 00:00:00,9.51,2.73,15.02
//! ```

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

use crate::index::TIMESTAMP_FORMAT;
use crate::table::{DemandTable, TableError};

/// Errors raised while reading an exported table back.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: cannot parse \"{value}\" as a timestamp")]
    Timestamp { line: u64, value: String },
    #[error("line {line}: cannot parse \"{value}\" as a number")]
    Value { line: u64, value: String },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Exports a demand table to a CSV file at the given path.
///
/// The table is written to a sibling temporary file which is then renamed
/// onto `path`, so a failed export never leaves a truncated file behind.
/// An existing file is replaced. Output is deterministic for identical
/// tables.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, writing or the final rename
/// fails.
pub fn export_csv(table: &DemandTable, path: &Path) -> io::Result<()> {
    let staging = staging_path(path);
    let written = File::create(&staging).and_then(|file| {
        let mut buf = io::BufWriter::new(file);
        write_csv(table, &mut buf)?;
        buf.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "wrote demand table"
    );
    Ok(())
}

/// Hidden temporary file next to `path`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "export".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Writes a demand table as CSV to any writer.
///
/// Values use the shortest representation that parses back to the same
/// `f64`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(table: &DemandTable, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(std::iter::once("").chain(table.labels()))?;

    for (i, ts) in table.index().iter().enumerate() {
        let mut record = Vec::with_capacity(table.column_count() + 1);
        record.push(ts.format(TIMESTAMP_FORMAT).to_string());
        record.extend(table.columns().iter().map(|c| c.values[i].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reads a CSV file written by [`export_csv`].
///
/// # Errors
///
/// Returns an `ImportError` on unreadable files, malformed timestamps or
/// values, or duplicate column labels.
pub fn import_csv(path: &Path) -> Result<DemandTable, ImportError> {
    let file = File::open(path).map_err(|e| ImportError::Csv(e.into()))?;
    read_csv(file)
}

/// Reads demand-table CSV data from any reader.
///
/// # Errors
///
/// See [`import_csv`].
pub fn read_csv(reader: impl Read) -> Result<DemandTable, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let labels: Vec<String> = rdr.headers()?.iter().skip(1).map(str::to_string).collect();

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw_ts = record.get(0).unwrap_or("");
        let ts = NaiveDateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT).map_err(|_| {
            ImportError::Timestamp {
                line,
                value: raw_ts.to_string(),
            }
        })?;
        index.push(ts);
        for (column, raw) in columns.iter_mut().zip(record.iter().skip(1)) {
            let value = raw.parse::<f64>().map_err(|_| ImportError::Value {
                line,
                value: raw.to_string(),
            })?;
            column.push(value);
        }
    }

    let mut table = DemandTable::from_timestamps(index);
    for (label, values) in labels.into_iter().zip(columns) {
        table.insert(label, values)?;
    }
    Ok(table)
}
