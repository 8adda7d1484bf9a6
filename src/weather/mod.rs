//! Hourly outdoor temperature input.

/// Seeded synthetic temperature year.
pub mod synthetic;

pub use synthetic::SyntheticTemperature;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a temperature series.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The file exists but could not be opened.
    #[error("cannot open \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The header row has no column with the requested name.
    #[error("missing required column \"{0}\"")]
    MissingColumn(String),
    /// A cell could not be parsed as a number.
    #[error("line {line}: cannot parse \"{value}\" as a temperature")]
    InvalidValue { line: u64, value: String },
    /// The file has a header but no data rows.
    #[error("no temperature readings found")]
    Empty,
}

/// Ordered hourly outdoor temperatures in °C.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemperatureSeries {
    values: Vec<f64>,
}

impl TemperatureSeries {
    /// Wraps a vector of hourly readings.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Hourly readings in °C.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no readings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean, or `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

impl From<Vec<f64>> for TemperatureSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Reads the named column of a temperature CSV file.
///
/// # Errors
///
/// Returns a `WeatherError` if the file cannot be opened, the column is
/// missing, a value does not parse, or there are no rows.
pub fn load_temperature_csv(path: &Path, column: &str) -> Result<TemperatureSeries, WeatherError> {
    let file = File::open(path).map_err(|source| WeatherError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = read_temperature_csv(file, column)?;
    debug!(
        path = %path.display(),
        readings = series.len(),
        "loaded temperature series"
    );
    Ok(series)
}

/// Reads the named column of temperature CSV data from any reader.
///
/// Header names are compared after trimming surrounding whitespace.
///
/// # Errors
///
/// See [`load_temperature_csv`].
pub fn read_temperature_csv(reader: impl Read, column: &str) -> Result<TemperatureSeries, WeatherError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let position = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| WeatherError::MissingColumn(column.to_string()))?;

    let mut values = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let raw = record.get(position).unwrap_or("");
        let value = raw.parse::<f64>().map_err(|_| WeatherError::InvalidValue {
            line,
            value: raw.to_string(),
        })?;
        values.push(value);
    }

    if values.is_empty() {
        return Err(WeatherError::Empty);
    }
    Ok(TemperatureSeries::new(values))
}
