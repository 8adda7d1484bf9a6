//! Annual consumption summary derived from a demand table.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::index::TIMESTAMP_FORMAT;
use crate::table::DemandTable;

/// Annual figures of one building category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// Column label.
    pub label: String,
    /// Sum over all hours (kWh).
    pub annual_kwh: f64,
    /// Highest hourly value (kWh in one hour, i.e. average kW).
    pub peak_kw: f64,
    /// Timestamp of the peak hour.
    pub peak_at: Option<NaiveDateTime>,
}

/// Annual consumption per category plus the overall total.
///
/// Computed post-hoc from the finished table so the report always agrees
/// with the exported data.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AnnualSummary {
    pub categories: Vec<CategorySummary>,
    pub total_kwh: f64,
}

impl AnnualSummary {
    pub fn from_table(table: &DemandTable) -> Self {
        let categories: Vec<CategorySummary> = table
            .columns()
            .iter()
            .map(|column| {
                let peak = column
                    .values
                    .iter()
                    .enumerate()
                    .fold(None::<(usize, f64)>, |best, (i, &v)| match best {
                        Some((_, b)) if b >= v => best,
                        _ => Some((i, v)),
                    });
                CategorySummary {
                    label: column.label.clone(),
                    annual_kwh: column.total(),
                    peak_kw: peak.map_or(0.0, |(_, v)| v),
                    peak_at: peak.and_then(|(i, _)| table.index().get(i).copied()),
                }
            })
            .collect();
        let total_kwh = categories.iter().map(|c| c.annual_kwh).sum();
        Self {
            categories,
            total_kwh,
        }
    }

    /// Summary of the category with the given label.
    pub fn category(&self, label: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for AnnualSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Annual consumption:")?;
        let width = self
            .categories
            .iter()
            .map(|c| c.label.len())
            .chain(std::iter::once("total".len()))
            .max()
            .unwrap_or(5);
        for c in &self.categories {
            write!(f, "  {:<width$}  {:>14.1} kWh", c.label, c.annual_kwh)?;
            if let Some(at) = c.peak_at {
                write!(f, "  (peak {:.2} kW at {})", c.peak_kw, at.format(TIMESTAMP_FORMAT))?;
            }
            writeln!(f)?;
        }
        write!(f, "  {:<width$}  {:>14.1} kWh", "total", self.total_kwh)
    }
}
