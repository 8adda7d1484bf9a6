use chrono::{Datelike, Timelike};
use tracing::debug;

use super::coefficients::{self, HourFactors};
use super::temperature::{self, DailyTemperatures};
use super::{DemandParameters, ProfileError, ProfileGenerator, TemperatureWeighting};
use crate::calendar::HolidayMap;
use crate::index::HourlyIndex;
use crate::weather::TemperatureSeries;

/// Weekday number used for Sundays and public holidays.
const SUNDAY: u8 = 7;

/// BDEW standard heat load profile.
///
/// Each hour receives `annual * kw * h * F * SF` where `h` is the daily
/// sigmoid factor, `F` the weekday factor and `SF` the hour factor of the
/// day's temperature band. `kw` scales the year so that the profile sums to
/// the annual demand.
///
/// # Examples
///
/// ```
/// use heat_demand::calendar::gb_2010_holidays;
/// use heat_demand::index::HourlyIndex;
/// use heat_demand::profile::{
///     BdewHeatProfile, BuildingClass, DemandParameters, ProfileGenerator, ShlpType, WindClass,
/// };
/// use heat_demand::weather::TemperatureSeries;
///
/// let index = HourlyIndex::for_year(2010).expect("valid year");
/// let temperature = TemperatureSeries::new(vec![8.0; index.len()]);
/// let params = DemandParameters::new(
///     "efh",
///     ShlpType::Efh,
///     BuildingClass::try_from(1u8).ok(),
///     WindClass::Normal,
///     25_000.0,
/// )
/// .expect("valid parameters");
///
/// let profile = BdewHeatProfile::default()
///     .generate(&index, &gb_2010_holidays(), &temperature, &params)
///     .expect("profile");
/// let total: f64 = profile.iter().sum();
/// assert!((total - 25_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BdewHeatProfile {
    weighting: TemperatureWeighting,
}

impl BdewHeatProfile {
    /// Creates a generator using the given daily temperature weighting.
    pub fn new(weighting: TemperatureWeighting) -> Self {
        Self { weighting }
    }

    /// Daily temperature weighting in use.
    pub fn weighting(&self) -> TemperatureWeighting {
        self.weighting
    }
}

impl ProfileGenerator for BdewHeatProfile {
    fn generate(
        &self,
        index: &HourlyIndex,
        holidays: &HolidayMap,
        temperature: &TemperatureSeries,
        params: &DemandParameters,
    ) -> Result<Vec<f64>, ProfileError> {
        if temperature.len() != index.len() {
            return Err(ProfileError::LengthMismatch {
                index: index.len(),
                temperature: temperature.len(),
            });
        }
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let daily = DailyTemperatures::new(index, temperature.values());
        let day_temperature = match self.weighting {
            TemperatureWeighting::Geometric => temperature::geometric_series(&daily.means),
            TemperatureWeighting::Mean => daily.means.clone(),
        };

        let sigmoid = coefficients::sigmoid(params.shlp_type, params.wind_class, params.hot_water);
        let hour_factors = HourFactors::for_type(params.shlp_type, params.building_class);

        // Unscaled h * F * SF per hour, plus h * F for the normalization.
        let mut raw = Vec::with_capacity(index.len());
        let mut daily_weight_sum = 0.0;
        for (i, ts) in index.iter().enumerate() {
            let day = daily.day_of_hour(i);
            let t = day_temperature[day];
            let weekday = if holidays.contains_key(&ts.date()) {
                SUNDAY
            } else {
                ts.weekday().number_from_monday() as u8
            };
            let h = sigmoid.daily_factor(t);
            let f = coefficients::weekday_factor(params.shlp_type, weekday);
            let sf = hour_factors.factor(weekday, ts.hour() as usize, temperature::interval(t));
            daily_weight_sum += h * f;
            raw.push(h * f * sf);
        }

        // Each hour contributes h * F once; 24 of them make up one day.
        let day_equivalents = daily_weight_sum / 24.0;
        if !day_equivalents.is_finite() || day_equivalents <= 0.0 {
            return Err(ProfileError::Degenerate);
        }
        let kw = 1.0 / day_equivalents;

        let raw_total: f64 = raw.iter().sum();
        debug!(
            label = %params.label,
            shlp_type = %params.shlp_type,
            kw,
            raw_total,
            "computed BDEW scaling"
        );

        Ok(raw
            .into_iter()
            .map(|value| params.annual_demand_kwh * kw * value)
            .collect())
    }
}
