mod common;

use std::fs;

use heat_demand::calendar::FixedHolidays;
use heat_demand::config::ScenarioConfig;
use heat_demand::io::export::import_csv;
use heat_demand::pipeline::{
    self, DEFAULT_OUTPUT_FILE, DEFAULT_TEMPERATURE_COLUMN, DEFAULT_TEMPERATURE_FILE, PipelineConfig, PipelineError,
    TemperatureInput,
};
use heat_demand::profile::{BdewHeatProfile, TemperatureWeighting};

fn gb_2010_config(dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        work_dir: dir.to_path_buf(),
        temperature: TemperatureInput::Csv {
            filename: DEFAULT_TEMPERATURE_FILE.to_string(),
            column: DEFAULT_TEMPERATURE_COLUMN.to_string(),
        },
        output_file: DEFAULT_OUTPUT_FILE.to_string(),
        year: 2010,
        categories: common::gb_2010_categories(),
    }
}

#[test]
fn gb_2010_run_produces_full_year_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);

    let outcome = pipeline::run(
        &gb_2010_config(dir.path()),
        &FixedHolidays::gb_2010(),
        &BdewHeatProfile::default(),
    )
    .expect("pipeline should run");

    assert_eq!(outcome.table.row_count(), common::HOURS_2010);
    assert_eq!(outcome.table.labels(), vec!["efh", "mfh", "ghd"]);
    assert_eq!(outcome.output_path, dir.path().join(DEFAULT_OUTPUT_FILE));
    assert!(outcome.output_path.is_file());

    for (label, annual) in [("efh", 78_000.0), ("mfh", 22_000.0), ("ghd", 140_000.0)] {
        let column = outcome.table.column(label).expect("column present");
        assert!(column.values.iter().all(|v| v.is_finite() && *v >= 0.0));
        let total = column.total();
        assert!(
            ((total - annual) / annual).abs() < 1e-6,
            "{label}: total {total} vs {annual}"
        );
        let reported = outcome.summary.category(label).map(|c| c.annual_kwh);
        assert_eq!(reported, Some(total));
    }
    assert!((outcome.summary.total_kwh - 240_000.0).abs() < 1e-3);
}

#[test]
fn winter_peak_exceeds_summer_peak() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);
    let outcome = pipeline::run(
        &gb_2010_config(dir.path()),
        &FixedHolidays::gb_2010(),
        &BdewHeatProfile::default(),
    )
    .expect("pipeline should run");

    let efh = outcome.table.column("efh").expect("efh column");
    let january: f64 = efh.values[..31 * 24].iter().sum();
    let july: f64 = efh.values[181 * 24..212 * 24].iter().sum();
    assert!(january > 2.0 * july, "january {january}, july {july}");
}

#[test]
fn repeated_runs_write_identical_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);
    let config = gb_2010_config(dir.path());
    let generator = BdewHeatProfile::default();

    let first = pipeline::run(&config, &FixedHolidays::gb_2010(), &generator).expect("first run");
    let first_bytes = fs::read(&first.output_path).expect("read first output");
    let second = pipeline::run(&config, &FixedHolidays::gb_2010(), &generator).expect("second run");
    let second_bytes = fs::read(&second.output_path).expect("read second output");

    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn exported_file_reads_back_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);
    let outcome = pipeline::run(
        &gb_2010_config(dir.path()),
        &FixedHolidays::gb_2010(),
        &BdewHeatProfile::new(TemperatureWeighting::Mean),
    )
    .expect("pipeline should run");

    let imported = import_csv(&outcome.output_path).expect("import written csv");
    assert_eq!(imported, outcome.table);

    let header = fs::read_to_string(&outcome.output_path)
        .expect("read output")
        .lines()
        .next()
        .map(str::to_string);
    assert_eq!(header.as_deref(), Some(",efh,mfh,ghd"));
}

#[test]
fn missing_temperature_file_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = pipeline::run(
        &gb_2010_config(dir.path()),
        &FixedHolidays::gb_2010(),
        &BdewHeatProfile::default(),
    )
    .err();

    assert!(matches!(err, Some(PipelineError::MissingInput { .. })));
    assert!(!dir.path().join(DEFAULT_OUTPUT_FILE).exists());
}

#[test]
fn space_heating_preset_runs_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    common::write_temperature_csv(dir.path(), DEFAULT_TEMPERATURE_FILE, common::HOURS_2010);
    let scenario = ScenarioConfig::from_preset("gb_2010_space_heating").expect("preset");
    assert!(scenario.validate().is_empty());

    let config = scenario.pipeline_config(dir.path(), None).expect("pipeline config");
    let calendar = scenario.holiday_provider().expect("calendar");
    let generator = scenario.profile_generator().expect("generator");
    let outcome = pipeline::run(&config, &calendar, &generator).expect("pipeline should run");

    assert_eq!(outcome.output_path, dir.path().join("space_heating_GB_2010.csv"));
    let ghd = outcome.table.column("ghd").expect("ghd column");
    assert!(((ghd.total() - 140_000.0) / 140_000.0).abs() < 1e-6);
}
