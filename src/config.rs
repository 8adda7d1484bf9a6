//! TOML-based scenario configuration and preset definitions.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::calendar::{FixedHolidays, HolidayMap, gb_2010_holidays};
use crate::pipeline::{
    DEFAULT_OUTPUT_FILE, DEFAULT_TEMPERATURE_COLUMN, DEFAULT_TEMPERATURE_FILE, PipelineConfig,
    TemperatureInput,
};
use crate::profile::{
    BdewHeatProfile, BuildingClass, DemandParameters, ProfileError, ShlpType, TemperatureWeighting,
    WindClass,
};

/// Top-level scenario configuration parsed from TOML.
///
/// Every section defaults to the GB 2010 scenario. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::gb_2010`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Temperature input location.
    #[serde(default)]
    pub input: InputConfig,
    /// Output file.
    #[serde(default)]
    pub output: OutputConfig,
    /// Year and holidays.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Profile method options.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Building categories, in output column order.
    #[serde(default = "default_buildings")]
    pub buildings: Vec<BuildingConfig>,
}

/// Temperature input location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// File name of the temperature CSV.
    pub temperature_file: String,
    /// Column holding the temperatures.
    pub temperature_column: String,
    /// Working directory; the process working directory when absent.
    pub directory: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            temperature_file: DEFAULT_TEMPERATURE_FILE.to_string(),
            temperature_column: DEFAULT_TEMPERATURE_COLUMN.to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File name of the exported table, relative to the working directory.
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

/// One configured holiday.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HolidayConfig {
    /// Date as `"YYYY-MM-DD"`.
    pub date: NaiveDate,
    pub name: String,
}

/// Year and holidays.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub year: i32,
    pub holidays: Vec<HolidayConfig>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            year: 2010,
            holidays: gb_2010_holidays()
                .into_iter()
                .map(|(date, name)| HolidayConfig { date, name })
                .collect(),
        }
    }
}

/// Profile method options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// `"geometric"` or `"mean"`.
    pub temperature_weighting: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            temperature_weighting: "geometric".to_string(),
        }
    }
}

/// One building category.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingConfig {
    /// Output column label.
    pub label: String,
    /// Shape-profile key such as `"EFH"` or `"ghd"`.
    pub shlp_type: String,
    /// 1..=11 for residential types, absent otherwise.
    #[serde(default)]
    pub building_class: Option<u8>,
    /// 0 (normal) or 1 (windy).
    #[serde(default)]
    pub wind_class: u8,
    /// Annual heat demand (kWh).
    pub annual_demand_kwh: f64,
    /// Include domestic hot water.
    #[serde(default = "default_hot_water")]
    pub hot_water: bool,
}

fn default_hot_water() -> bool {
    true
}

impl BuildingConfig {
    fn new(label: &str, shlp_type: &str, building_class: Option<u8>, annual_demand_kwh: f64) -> Self {
        Self {
            label: label.to_string(),
            shlp_type: shlp_type.to_string(),
            building_class,
            wind_class: 0,
            annual_demand_kwh,
            hot_water: true,
        }
    }

    /// Converts into validated profile parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid field.
    pub fn to_parameters(&self, position: usize) -> Result<DemandParameters, ConfigError> {
        let field = |name: &str| format!("buildings[{position}].{name}");
        let shlp_type: ShlpType = self.shlp_type.parse().map_err(|_| ConfigError {
            field: field("shlp_type"),
            message: format!(
                "unknown type \"{}\", available: {}",
                self.shlp_type,
                ShlpType::names().join(", ")
            ),
        })?;
        let building_class = self
            .building_class
            .map(BuildingClass::try_from)
            .transpose()
            .map_err(|e| ConfigError {
                field: field("building_class"),
                message: e.to_string(),
            })?;
        let wind_class = WindClass::try_from(self.wind_class).map_err(|e| ConfigError {
            field: field("wind_class"),
            message: e.to_string(),
        })?;
        let params = DemandParameters::new(
            self.label.clone(),
            shlp_type,
            building_class,
            wind_class,
            self.annual_demand_kwh,
        )
        .map_err(|e| ConfigError {
            field: match e {
                ProfileError::InvalidAnnualDemand(_) => field("annual_demand_kwh"),
                _ => field("building_class"),
            },
            message: e.to_string(),
        })?;
        Ok(if self.hot_water {
            params
        } else {
            params.without_hot_water()
        })
    }
}

fn default_buildings() -> Vec<BuildingConfig> {
    vec![
        BuildingConfig {
            wind_class: 1,
            ..BuildingConfig::new("efh", "EFH", Some(1), 78_000.0)
        },
        BuildingConfig::new("mfh", "MFH", Some(2), 22_000.0),
        BuildingConfig::new("ghd", "GHD", None, 140_000.0),
    ]
}

/// A configuration validation error with the offending field path.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted path of the field, e.g. `buildings[0].wind_class`.
    pub field: String,
    /// Description of the violation.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Residential and commercial demand for Great Britain in 2010.
    pub fn gb_2010() -> Self {
        Self {
            input: InputConfig::default(),
            output: OutputConfig::default(),
            calendar: CalendarConfig::default(),
            profile: ProfileConfig::default(),
            buildings: default_buildings(),
        }
    }

    /// The GB 2010 scenario without domestic hot water.
    pub fn gb_2010_space_heating() -> Self {
        let mut cfg = Self::gb_2010();
        cfg.output.file = "space_heating_GB_2010.csv".to_string();
        for building in &mut cfg.buildings {
            building.hot_water = false;
        }
        cfg
    }

    /// Names of the built-in presets.
    pub const PRESETS: &[&str] = &["gb_2010", "gb_2010_space_heating"];

    /// Looks up a built-in preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` listing the available presets if `name` is
    /// unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "gb_2010" => Ok(Self::gb_2010()),
            "gb_2010_space_heating" => Ok(Self::gb_2010_space_heating()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Reads a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on syntax errors and unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Checks every field and returns all violations.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.input.temperature_file.trim().is_empty() {
            errors.push(ConfigError {
                field: "input.temperature_file".into(),
                message: "must not be empty".into(),
            });
        }
        if self.output.file.trim().is_empty() {
            errors.push(ConfigError {
                field: "output.file".into(),
                message: "must not be empty".into(),
            });
        }
        if let Err(message) = self.profile.temperature_weighting.parse::<TemperatureWeighting>() {
            errors.push(ConfigError {
                field: "profile.temperature_weighting".into(),
                message,
            });
        }

        let year = self.calendar.year;
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            errors.push(ConfigError {
                field: "calendar.year".into(),
                message: format!("{year} is not a supported year"),
            });
        }
        let mut seen_dates = BTreeSet::new();
        for (i, holiday) in self.calendar.holidays.iter().enumerate() {
            if holiday.date.year() != year {
                errors.push(ConfigError {
                    field: format!("calendar.holidays[{i}].date"),
                    message: format!("{} ({}) is not in {year}", holiday.date, holiday.name),
                });
            }
            if !seen_dates.insert(holiday.date) {
                errors.push(ConfigError {
                    field: format!("calendar.holidays[{i}].date"),
                    message: format!("{} is listed more than once", holiday.date),
                });
            }
        }

        if self.buildings.is_empty() {
            errors.push(ConfigError {
                field: "buildings".into(),
                message: "at least one building category is required".into(),
            });
        }
        let mut seen_labels = BTreeSet::new();
        for (i, building) in self.buildings.iter().enumerate() {
            if building.label.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("buildings[{i}].label"),
                    message: "must not be empty".into(),
                });
            } else if !seen_labels.insert(building.label.as_str()) {
                errors.push(ConfigError {
                    field: format!("buildings[{i}].label"),
                    message: format!("duplicate label \"{}\"", building.label),
                });
            }
            if let Err(e) = building.to_parameters(i) {
                errors.push(e);
            }
        }

        errors
    }

    /// Configured holidays as a map.
    pub fn holiday_map(&self) -> HolidayMap {
        self.calendar
            .holidays
            .iter()
            .map(|h| (h.date, h.name.clone()))
            .collect()
    }

    /// Holiday provider for the configured year.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a holiday lies outside the year.
    pub fn holiday_provider(&self) -> Result<FixedHolidays, ConfigError> {
        FixedHolidays::new(self.calendar.year, self.holiday_map()).map_err(|e| ConfigError {
            field: "calendar.holidays".into(),
            message: e.to_string(),
        })
    }

    /// Profile generator with the configured temperature weighting.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown weighting.
    pub fn profile_generator(&self) -> Result<BdewHeatProfile, ConfigError> {
        self.profile
            .temperature_weighting
            .parse::<TemperatureWeighting>()
            .map(BdewHeatProfile::new)
            .map_err(|message| ConfigError {
                field: "profile.temperature_weighting".into(),
                message,
            })
    }

    /// Builds the run configuration.
    ///
    /// `work_dir` is used when the scenario does not name a directory.
    /// `synthetic` replaces the temperature file with a seeded synthetic
    /// year.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` from converting building categories.
    pub fn pipeline_config(&self, work_dir: &Path, synthetic: Option<u64>) -> Result<PipelineConfig, ConfigError> {
        let categories = self
            .buildings
            .iter()
            .enumerate()
            .map(|(i, b)| b.to_parameters(i))
            .collect::<Result<Vec<_>, _>>()?;
        let temperature = match synthetic {
            Some(seed) => TemperatureInput::Synthetic { seed },
            None => TemperatureInput::Csv {
                filename: self.input.temperature_file.clone(),
                column: self.input.temperature_column.clone(),
            },
        };
        Ok(PipelineConfig {
            work_dir: self
                .input
                .directory
                .clone()
                .unwrap_or_else(|| work_dir.to_path_buf()),
            temperature,
            output_file: self.output.file.clone(),
            year: self.calendar.year,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name).expect("preset exists");
            let errors = cfg.validate();
            assert!(errors.is_empty(), "{name} should be valid: {errors:?}");
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert!(e.message.contains("gb_2010"));
    }

    #[test]
    fn empty_toml_is_gb_2010() {
        let cfg = ScenarioConfig::from_toml_str("").expect("empty toml parses");
        assert_eq!(cfg.calendar.year, 2010);
        assert_eq!(cfg.calendar.holidays.len(), 11);
        assert_eq!(cfg.buildings.len(), 3);
        assert_eq!(cfg.output.file, "heat_demand_GB_2010.csv");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[input]
temperature_file = "weather.csv"
temperature_column = "t_air"

[output]
file = "demand.csv"

[calendar]
year = 2012
holidays = [
    { date = "2012-01-02", name = "New year substitute" },
    { date = "2012-12-25", name = "Christmas Day" },
]

[profile]
temperature_weighting = "mean"

[[buildings]]
label = "houses"
shlp_type = "efh"
building_class = 4
wind_class = 1
annual_demand_kwh = 5000.0

[[buildings]]
label = "shops"
shlp_type = "GHA"
annual_demand_kwh = 12000.0
hot_water = false
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("valid toml");
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.calendar.year, 2012);
        assert_eq!(cfg.buildings[1].label, "shops");
        assert!(!cfg.buildings[1].hot_water);

        let pipeline = cfg
            .pipeline_config(Path::new("/data"), None)
            .expect("pipeline config");
        assert_eq!(pipeline.work_dir, PathBuf::from("/data"));
        assert_eq!(pipeline.categories[0].wind_class, WindClass::Windy);
        assert_eq!(
            pipeline.temperature,
            TemperatureInput::Csv {
                filename: "weather.csv".to_string(),
                column: "t_air".to_string()
            }
        );
        assert_eq!(
            cfg.profile_generator().map(|g| g.weighting()).ok(),
            Some(TemperatureWeighting::Mean)
        );
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = ScenarioConfig::from_toml_str("[input]\ntemperature = \"x.csv\"\n");
        assert!(err.is_err());
        assert_eq!(err.unwrap_err().field, "toml");
    }

    #[test]
    fn holiday_outside_year_rejected() {
        let mut cfg = ScenarioConfig::gb_2010();
        cfg.calendar.holidays.push(HolidayConfig {
            date: NaiveDate::from_ymd_opt(2011, 1, 3).expect("valid date"),
            name: "Substitute".to_string(),
        });
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "calendar.holidays[11].date"));
        assert!(cfg.holiday_provider().is_err());
    }

    #[test]
    fn duplicate_holiday_rejected() {
        let mut cfg = ScenarioConfig::gb_2010();
        let first = cfg.calendar.holidays[0].clone();
        cfg.calendar.holidays.push(first);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.message.contains("more than once")));
    }

    #[test]
    fn building_class_rules_enforced() {
        let mut cfg = ScenarioConfig::gb_2010();
        cfg.buildings[0].building_class = None;
        cfg.buildings[1].building_class = Some(12);
        cfg.buildings[2].building_class = Some(3);
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"buildings[0].building_class".to_string()));
        assert!(fields.contains(&"buildings[1].building_class".to_string()));
        assert!(fields.contains(&"buildings[2].building_class".to_string()));
    }

    #[test]
    fn invalid_values_reported() {
        let mut cfg = ScenarioConfig::gb_2010();
        cfg.buildings[0].wind_class = 2;
        cfg.buildings[1].annual_demand_kwh = -5.0;
        cfg.buildings[2].shlp_type = "XYZ".to_string();
        cfg.buildings.push(BuildingConfig::new("efh", "EFH", Some(1), 10.0));
        cfg.profile.temperature_weighting = "median".to_string();
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"buildings[0].wind_class".to_string()));
        assert!(fields.contains(&"buildings[1].annual_demand_kwh".to_string()));
        assert!(fields.contains(&"buildings[2].shlp_type".to_string()));
        assert!(fields.contains(&"buildings[3].label".to_string()));
        assert!(fields.contains(&"profile.temperature_weighting".to_string()));
    }

    #[test]
    fn space_heating_preset_excludes_hot_water() {
        let cfg = ScenarioConfig::gb_2010_space_heating();
        let pipeline = cfg
            .pipeline_config(Path::new("."), Some(5))
            .expect("pipeline config");
        assert!(pipeline.categories.iter().all(|c| !c.hot_water));
        assert_eq!(pipeline.temperature, TemperatureInput::Synthetic { seed: 5 });
    }

    #[test]
    fn gb_2010_wind_classes() {
        for cfg in [ScenarioConfig::gb_2010(), ScenarioConfig::gb_2010_space_heating()] {
            let pipeline = cfg
                .pipeline_config(Path::new("."), None)
                .expect("pipeline config");
            let winds: Vec<(&str, WindClass)> = pipeline
                .categories
                .iter()
                .map(|c| (c.label.as_str(), c.wind_class))
                .collect();
            assert_eq!(
                winds,
                vec![
                    ("efh", WindClass::Windy),
                    ("mfh", WindClass::Normal),
                    ("ghd", WindClass::Normal),
                ]
            );
        }
    }

    #[test]
    fn bundled_scenario_matches_preset() {
        let cfg = ScenarioConfig::from_toml_str(include_str!("../scenarios/gb_2010.toml"))
            .expect("bundled scenario parses");
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        let preset = ScenarioConfig::gb_2010();
        assert_eq!(cfg.holiday_map(), preset.holiday_map());
        let dir = Path::new(".");
        assert_eq!(
            cfg.pipeline_config(dir, None).ok(),
            preset.pipeline_config(dir, None).ok()
        );
    }

    #[test]
    fn directory_overrides_work_dir() {
        let mut cfg = ScenarioConfig::gb_2010();
        cfg.input.directory = Some(PathBuf::from("/srv/weather"));
        let pipeline = cfg
            .pipeline_config(Path::new("."), None)
            .expect("pipeline config");
        assert_eq!(pipeline.work_dir, PathBuf::from("/srv/weather"));
    }
}
