//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use heat_demand::profile::{BuildingClass, DemandParameters, ShlpType, WindClass};

/// Hours in 2010.
pub const HOURS_2010: usize = 8760;

/// Deterministic hourly temperature in °C: cold January, warm July, and a
/// small afternoon peak.
pub fn temperature_at(hour: usize) -> f64 {
    let day = (hour / 24) as f64;
    let hour_of_day = (hour % 24) as f64;
    let season = (2.0 * std::f64::consts::PI * (day - 20.0) / 365.0).cos();
    let diurnal = (2.0 * std::f64::consts::PI * (hour_of_day - 15.0) / 24.0).cos();
    9.5 - 7.5 * season + 2.5 * diurnal
}

/// Writes a temperature CSV with `hours` rows into `dir` and returns its path.
pub fn write_temperature_csv(dir: &Path, filename: &str, hours: usize) -> PathBuf {
    let mut content = String::from("hour,temperature\n");
    for h in 0..hours {
        let _ = writeln!(content, "{h},{:.2}", temperature_at(h));
    }
    let path = dir.join(filename);
    fs::write(&path, content).expect("temperature fixture should be written");
    path
}

/// The three GB 2010 categories: a windy EFH, MFH and GHD.
pub fn gb_2010_categories() -> Vec<DemandParameters> {
    vec![
        DemandParameters::new(
            "efh",
            ShlpType::Efh,
            BuildingClass::try_from(1u8).ok(),
            WindClass::Windy,
            78_000.0,
        )
        .expect("efh parameters"),
        DemandParameters::new(
            "mfh",
            ShlpType::Mfh,
            BuildingClass::try_from(2u8).ok(),
            WindClass::Normal,
            22_000.0,
        )
        .expect("mfh parameters"),
        DemandParameters::new("ghd", ShlpType::Ghd, None, WindClass::Normal, 140_000.0)
            .expect("ghd parameters"),
    ]
}

/// Runs the binary in `dir` with the given arguments.
pub fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heat-demand"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("heat-demand process should run")
}
