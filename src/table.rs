//! Timestamp-indexed table of demand columns.

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::index::{HourlyIndex, TIMESTAMP_FORMAT};

/// Rows shown at each end of the console rendering.
const PREVIEW_ROWS: usize = 5;

/// Errors raised while assembling a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A column does not have one value per timestamp.
    #[error("column \"{label}\" has {found} values, index has {expected}")]
    LengthMismatch {
        label: String,
        expected: usize,
        found: usize,
    },
    /// A column with the same label already exists.
    #[error("duplicate column \"{0}\"")]
    DuplicateColumn(String),
}

/// One labelled demand series.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandColumn {
    /// Column label.
    pub label: String,
    /// Hourly demand in kWh, aligned on the table index.
    pub values: Vec<f64>,
}

impl DemandColumn {
    /// Sum over all hours.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Hourly demand per building category, sharing one timestamp index.
///
/// Columns keep their insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DemandTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<DemandColumn>,
}

impl DemandTable {
    /// Creates an empty table over `index`.
    pub fn new(index: &HourlyIndex) -> Self {
        Self::from_timestamps(index.to_vec())
    }

    /// Creates an empty table over explicit timestamps.
    pub fn from_timestamps(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns `TableError::LengthMismatch` if `values` does not match the
    /// index length, or `TableError::DuplicateColumn` if `label` is taken.
    pub fn insert(&mut self, label: impl Into<String>, values: Vec<f64>) -> Result<(), TableError> {
        let label = label.into();
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                label,
                expected: self.index.len(),
                found: values.len(),
            });
        }
        if self.column(&label).is_some() {
            return Err(TableError::DuplicateColumn(label));
        }
        self.columns.push(DemandColumn { label, values });
        Ok(())
    }

    /// Timestamps of the rows.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[DemandColumn] {
        &self.columns
    }

    /// Column with the given label.
    pub fn column(&self, label: &str) -> Option<&DemandColumn> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Column labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Number of hourly rows.
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Number of category columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Timestamp and values of row `i`, or `None` past the end.
    pub fn row(&self, i: usize) -> Option<(NaiveDateTime, Vec<f64>)> {
        let ts = *self.index.get(i)?;
        Some((ts, self.columns.iter().map(|c| c.values[i]).collect()))
    }
}

impl fmt::Display for DemandTable {
    /// Renders the first and last rows with a size footer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp_width = 19;
        let widths: Vec<usize> = self.columns.iter().map(|c| c.label.len().max(12)).collect();

        write!(f, "{:stamp_width$}", "")?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.label)?;
        }
        writeln!(f)?;

        let write_row = |f: &mut fmt::Formatter<'_>, i: usize| -> fmt::Result {
            write!(f, "{}", self.index[i].format(TIMESTAMP_FORMAT))?;
            for (column, width) in self.columns.iter().zip(&widths) {
                write!(f, "  {:>width$.6}", column.values[i])?;
            }
            writeln!(f)
        };

        let rows = self.row_count();
        if rows <= 2 * PREVIEW_ROWS {
            for i in 0..rows {
                write_row(f, i)?;
            }
        } else {
            for i in 0..PREVIEW_ROWS {
                write_row(f, i)?;
            }
            writeln!(f, "...")?;
            for i in rows - PREVIEW_ROWS..rows {
                write_row(f, i)?;
            }
        }

        writeln!(f)?;
        write!(f, "[{} rows x {} columns]", rows, self.column_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table(hours: usize) -> DemandTable {
        let start = HourlyIndex::for_year(2010).expect("valid year").start();
        DemandTable::new(&HourlyIndex::from_start(start, hours))
    }

    #[test]
    fn columns_keep_insertion_order() {
        let mut table = small_table(3);
        table.insert("mfh", vec![1.0, 2.0, 3.0]).expect("insert mfh");
        table.insert("efh", vec![4.0, 5.0, 6.0]).expect("insert efh");
        assert_eq!(table.labels(), vec!["mfh", "efh"]);
        assert_eq!(table.column("efh").map(DemandColumn::total), Some(15.0));
        assert_eq!(table.row(1).map(|(_, v)| v), Some(vec![2.0, 5.0]));
        assert_eq!(table.row(3), None);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut table = small_table(3);
        let err = table.insert("efh", vec![1.0]);
        assert_eq!(
            err,
            Err(TableError::LengthMismatch {
                label: "efh".to_string(),
                expected: 3,
                found: 1
            })
        );
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let mut table = small_table(2);
        table.insert("ghd", vec![1.0, 2.0]).expect("first insert");
        let err = table.insert("ghd", vec![3.0, 4.0]);
        assert_eq!(err, Err(TableError::DuplicateColumn("ghd".to_string())));
    }

    #[test]
    fn display_elides_middle_rows() {
        let mut table = small_table(24);
        table.insert("efh", (0..24).map(f64::from).collect()).expect("insert");
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        // header + 5 + "..." + 5 + blank + footer
        assert_eq!(lines.len(), 14);
        assert!(lines[0].trim_end().ends_with("efh"));
        assert!(lines[1].starts_with("2010-01-01 00:00:00"));
        assert_eq!(lines[6], "...");
        assert!(lines[11].starts_with("2010-01-01 23:00:00"));
        assert!(lines[11].ends_with("23.000000"));
        assert_eq!(lines[13], "[24 rows x 1 columns]");
    }

    #[test]
    fn display_short_table_in_full() {
        let mut table = small_table(3);
        table.insert("a", vec![0.5, 1.5, 2.5]).expect("insert");
        let rendered = table.to_string();
        assert_eq!(rendered.lines().count(), 6);
        assert!(!rendered.contains("..."));
    }
}
