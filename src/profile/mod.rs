//! Hourly heat-demand profile generation.
//!
//! [`ProfileGenerator`] is the seam between the pipeline and the load-profile
//! method. [`BdewHeatProfile`] implements the BDEW standard heat load profile;
//! tests substitute their own generators.

/// BDEW heat load profile generator.
pub mod bdew;
/// Tabulated BDEW coefficients.
pub mod coefficients;
/// Daily temperature aggregation and banding.
pub mod temperature;

pub use bdew::BdewHeatProfile;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::calendar::HolidayMap;
use crate::index::HourlyIndex;
use crate::weather::TemperatureSeries;

/// Highest residential building class.
pub const MAX_BUILDING_CLASS: u8 = 11;

/// Errors raised while building parameters or generating a profile.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    /// Temperature series and timestamp index differ in length.
    #[error("temperature series has {temperature} readings, index has {index} hours")]
    LengthMismatch { index: usize, temperature: usize },
    /// Unrecognised shape-profile key.
    #[error("unknown shlp_type \"{0}\"")]
    UnknownShlpType(String),
    /// Wind class outside 0..=1.
    #[error("wind class must be 0 or 1, got {0}")]
    InvalidWindClass(u8),
    /// Building class outside 1..=11.
    #[error("building class must be in 1..=11, got {0}")]
    InvalidBuildingClass(u8),
    /// A residential profile was requested without a building class.
    #[error("{0} is residential and needs a building class")]
    BuildingClassRequired(ShlpType),
    /// A building class was given for a commercial profile.
    #[error("{0} is not residential, building class does not apply")]
    BuildingClassNotApplicable(ShlpType),
    /// Annual demand must be positive and finite.
    #[error("annual demand must be a positive number, got {0}")]
    InvalidAnnualDemand(f64),
    /// The daily factors summed to zero or a non-finite value.
    #[error("profile cannot be normalized, check the temperature series for gaps")]
    Degenerate,
}

/// Shape-load-profile type.
///
/// `EFH` and `MFH` are residential; the remaining keys are commercial
/// sub-sectors of trade and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShlpType {
    /// Single-family house (Einfamilienhaus).
    Efh,
    /// Multi-family house (Mehrfamilienhaus).
    Mfh,
    /// Trade, commerce and services in aggregate.
    Ghd,
    /// Public administration and offices.
    Gko,
    /// Retail.
    Gha,
    /// Metal and automotive workshops.
    Gmk,
    /// Other business services.
    Gbd,
}

impl ShlpType {
    /// Every supported profile type.
    pub const ALL: [Self; 7] = [
        Self::Efh,
        Self::Mfh,
        Self::Ghd,
        Self::Gko,
        Self::Gha,
        Self::Gmk,
        Self::Gbd,
    ];

    /// Upper-case key of the profile type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Efh => "EFH",
            Self::Mfh => "MFH",
            Self::Ghd => "GHD",
            Self::Gko => "GKO",
            Self::Gha => "GHA",
            Self::Gmk => "GMK",
            Self::Gbd => "GBD",
        }
    }

    /// Returns `true` for residential profile types.
    pub fn is_residential(self) -> bool {
        matches!(self, Self::Efh | Self::Mfh)
    }

    /// Keys of every supported type.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for ShlpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShlpType {
    type Err = ProfileError;

    /// Parses a profile key, ignoring case (`"ghd"` and `"GHD"` are equal).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ProfileError::UnknownShlpType(s.to_string()))
    }
}

/// Wind exposure of the building site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindClass {
    /// Sheltered or normal exposure.
    #[default]
    Normal,
    /// Windy site with higher temperature sensitivity.
    Windy,
}

impl TryFrom<u8> for WindClass {
    type Error = ProfileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Windy),
            other => Err(ProfileError::InvalidWindClass(other)),
        }
    }
}

/// Residential construction class, 1 to 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingClass(u8);

impl BuildingClass {
    /// Raw class number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BuildingClass {
    type Error = ProfileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_BUILDING_CLASS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ProfileError::InvalidBuildingClass(value))
        }
    }
}

/// How hourly temperatures are condensed into the daily value the
/// sigmoid is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureWeighting {
    /// Daily mean blended with the three previous days (weights 1, ½, ¼, ⅛).
    #[default]
    Geometric,
    /// Plain daily mean.
    Mean,
}

impl FromStr for TemperatureWeighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geometric" => Ok(Self::Geometric),
            "mean" => Ok(Self::Mean),
            other => Err(format!("must be \"geometric\" or \"mean\", got \"{other}\"")),
        }
    }
}

/// Physical parameters of one building category.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandParameters {
    /// Column label in the demand table.
    pub label: String,
    /// Shape-load-profile type.
    pub shlp_type: ShlpType,
    /// Construction class; residential types only.
    pub building_class: Option<BuildingClass>,
    /// Wind exposure.
    pub wind_class: WindClass,
    /// Annual heat demand (kWh).
    pub annual_demand_kwh: f64,
    /// Whether domestic hot water is part of the demand.
    pub hot_water: bool,
}

impl DemandParameters {
    /// Builds validated parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError` when the building class does not match the
    /// residential/commercial nature of `shlp_type`, or the annual demand is
    /// not a positive finite number.
    pub fn new(
        label: impl Into<String>,
        shlp_type: ShlpType,
        building_class: Option<BuildingClass>,
        wind_class: WindClass,
        annual_demand_kwh: f64,
    ) -> Result<Self, ProfileError> {
        match (shlp_type.is_residential(), building_class) {
            (true, None) => return Err(ProfileError::BuildingClassRequired(shlp_type)),
            (false, Some(_)) => return Err(ProfileError::BuildingClassNotApplicable(shlp_type)),
            _ => {}
        }
        if !annual_demand_kwh.is_finite() || annual_demand_kwh <= 0.0 {
            return Err(ProfileError::InvalidAnnualDemand(annual_demand_kwh));
        }
        Ok(Self {
            label: label.into(),
            shlp_type,
            building_class,
            wind_class,
            annual_demand_kwh,
            hot_water: true,
        })
    }

    /// Excludes domestic hot water, leaving space heating only.
    pub fn without_hot_water(mut self) -> Self {
        self.hot_water = false;
        self
    }
}

/// Produces an hourly demand sequence for one building category.
pub trait ProfileGenerator {
    /// Generates one value per hour of `index`.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError` if the inputs are inconsistent, e.g. the
    /// temperature series length differs from the index length.
    fn generate(
        &self,
        index: &HourlyIndex,
        holidays: &HolidayMap,
        temperature: &TemperatureSeries,
        params: &DemandParameters,
    ) -> Result<Vec<f64>, ProfileError>;
}
