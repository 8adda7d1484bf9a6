//! API response and query types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::TIMESTAMP_FORMAT;
use crate::table::DemandTable;

/// One hourly row of the demand table.
#[derive(Debug, Serialize)]
pub struct ProfileRecord {
    /// Row position in the table.
    pub row: usize,
    /// Timestamp formatted as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Demand per category label (kWh).
    pub values: BTreeMap<String, f64>,
}

impl ProfileRecord {
    /// Builds the record for row `i`, or `None` past the end.
    pub fn from_row(table: &DemandTable, i: usize) -> Option<Self> {
        let (ts, values) = table.row(i)?;
        Some(Self {
            row: i,
            timestamp: ts.format(TIMESTAMP_FORMAT).to_string(),
            values: table
                .labels()
                .into_iter()
                .map(str::to_string)
                .zip(values)
                .collect(),
        })
    }
}

/// Query parameters for `/profiles`.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// First row (inclusive).
    pub from: Option<usize>,
    /// Last row (inclusive).
    pub to: Option<usize>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
