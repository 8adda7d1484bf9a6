//! End-to-end run: temperature input, per-category profiles, table, export.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use thiserror::Error;
use tracing::{info, warn};

use crate::calendar::{CalendarError, HolidayMap, HolidayProvider};
use crate::index::HourlyIndex;
use crate::io::export::export_csv;
use crate::profile::{DemandParameters, ProfileError, ProfileGenerator};
use crate::reporting::AnnualSummary;
use crate::table::{DemandTable, TableError};
use crate::weather::{self, SyntheticTemperature, TemperatureSeries, WeatherError};

/// Temperature file looked up in the working directory by default.
pub const DEFAULT_TEMPERATURE_FILE: &str = "temperature_GB_2010.csv";
/// Default name of the exported demand table.
pub const DEFAULT_OUTPUT_FILE: &str = "heat_demand_GB_2010.csv";
/// Default temperature column name.
pub const DEFAULT_TEMPERATURE_COLUMN: &str = "temperature";

/// Where hourly temperatures come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureInput {
    /// A CSV file in the working directory.
    Csv { filename: String, column: String },
    /// A seeded synthetic year.
    Synthetic { seed: u64 },
}

impl Default for TemperatureInput {
    fn default() -> Self {
        Self::Csv {
            filename: DEFAULT_TEMPERATURE_FILE.to_string(),
            column: DEFAULT_TEMPERATURE_COLUMN.to_string(),
        }
    }
}

/// Everything one run needs; nothing is read from global state.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the temperature input and receiving the output.
    pub work_dir: PathBuf,
    pub temperature: TemperatureInput,
    /// Output file name, relative to `work_dir`.
    pub output_file: String,
    /// Calendar year of the hourly index.
    pub year: i32,
    /// Building categories in output column order.
    pub categories: Vec<DemandParameters>,
}

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The temperature file does not exist. The CLI treats this as a
    /// graceful stop rather than a failure.
    #[error(
        "The temperature file \"{filename}\" was not found in \"{}\".\n\
         This could happen for one of these reasons:\n\
         * the temperature data has not been downloaded yet\n\
         * the filename is wrong\n\
         * the file is not located in that directory\n\
         Download an hourly temperature CSV with a \"temperature\" column for the\n\
         whole year into that directory, pass another file with --input, or\n\
         run with --synthetic <seed> to use a generated temperature year.",
        .dir.display()
    )]
    MissingInput { filename: String, dir: PathBuf },
    #[error("year {0} cannot be represented as an hourly index")]
    InvalidYear(i32),
    #[error("temperature input: {0}")]
    Weather(#[from] WeatherError),
    #[error("calendar: {0}")]
    Calendar(#[from] CalendarError),
    #[error("profile \"{label}\": {source}")]
    Profile {
        label: String,
        #[source]
        source: ProfileError,
    },
    #[error("table: {0}")]
    Table(#[from] TableError),
    #[error("cannot write \"{}\": {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub table: DemandTable,
    pub summary: AnnualSummary,
    /// Path of the written CSV file.
    pub output_path: PathBuf,
}

/// Runs the whole pipeline and writes the CSV file.
///
/// The output file is only written once every category has been generated,
/// so a failing run leaves no partial output behind.
///
/// # Errors
///
/// Returns `PipelineError::MissingInput` when the temperature file is absent,
/// and the other variants for invalid inputs or I/O failures.
pub fn run<H, G>(config: &PipelineConfig, calendar: &H, generator: &G) -> Result<RunOutcome, PipelineError>
where
    H: HolidayProvider,
    G: ProfileGenerator,
{
    let index = HourlyIndex::for_year(config.year).ok_or(PipelineError::InvalidYear(config.year))?;
    let temperature = load_temperature(config, index.len())?;
    let holidays = calendar.holidays(config.year)?;

    let table = generate_table(&index, &holidays, &temperature, &config.categories, generator)?;
    let summary = AnnualSummary::from_table(&table);

    let output_path = config.work_dir.join(&config.output_file);
    export_csv(&table, &output_path).map_err(|source| PipelineError::Export {
        path: output_path.clone(),
        source,
    })?;

    Ok(RunOutcome {
        table,
        summary,
        output_path,
    })
}

/// Resolves `filename` inside `dir`, failing with `MissingInput` if absent.
///
/// # Errors
///
/// Returns `PipelineError::MissingInput` if the path is not a file.
pub fn locate_input(dir: &Path, filename: &str) -> Result<PathBuf, PipelineError> {
    let path = dir.join(filename);
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::MissingInput {
            filename: filename.to_string(),
            dir: dir.to_path_buf(),
        })
    }
}

/// Loads or synthesizes the temperature series for a run.
///
/// # Errors
///
/// Returns `MissingInput` for an absent file and `Weather` for unreadable
/// content.
pub fn load_temperature(config: &PipelineConfig, hours: usize) -> Result<TemperatureSeries, PipelineError> {
    match &config.temperature {
        TemperatureInput::Csv { filename, column } => {
            let path = locate_input(&config.work_dir, filename)?;
            let series = weather::load_temperature_csv(&path, column)?;
            info!(path = %path.display(), readings = series.len(), "loaded temperature data");
            Ok(series)
        }
        TemperatureInput::Synthetic { seed } => {
            info!(seed, hours, "generating synthetic temperature year");
            Ok(SyntheticTemperature::temperate(*seed).series(hours))
        }
    }
}

/// Generates one column per category and collects them into a table.
///
/// # Errors
///
/// Returns `Profile` for a failing generator and `Table` if two categories
/// share a label.
pub fn generate_table<G: ProfileGenerator>(
    index: &HourlyIndex,
    holidays: &HolidayMap,
    temperature: &TemperatureSeries,
    categories: &[DemandParameters],
    generator: &G,
) -> Result<DemandTable, PipelineError> {
    let outside: Vec<_> = holidays
        .keys()
        .filter(|date| date.year() != index.year())
        .collect();
    if !outside.is_empty() {
        warn!(count = outside.len(), year = index.year(), "holidays outside the index are ignored");
    }

    let mut table = DemandTable::new(index);
    for params in categories {
        let values = generator
            .generate(index, holidays, temperature, params)
            .map_err(|source| PipelineError::Profile {
                label: params.label.clone(),
                source,
            })?;
        let total: f64 = values.iter().sum();
        info!(
            label = %params.label,
            shlp_type = %params.shlp_type,
            annual_kwh = total,
            "generated heat demand profile"
        );
        table.insert(params.label.clone(), values)?;
    }
    Ok(table)
}
