//! Coefficients of the BDEW heat load profiles.
//!
//! The sigmoid parameters and weekday factors are modelled on the BDEW
//! tables. Hour factors are stored as a cold-day and a warm-day shape per
//! profile family and blended across the ten temperature bands.

use super::{BuildingClass, ShlpType, WindClass};

/// Reference temperature of the sigmoid in °C.
const REFERENCE_TEMPERATURE_C: f64 = 40.0;
/// Highest temperature the sigmoid is evaluated at.
const MAX_EVALUATED_TEMPERATURE_C: f64 = REFERENCE_TEMPERATURE_C - 1.0;
/// Number of temperature bands.
pub const INTERVALS: usize = 10;
/// Share of a flat profile mixed in per building class step.
const CLASS_DAMPING_STEP: f64 = 0.03;

/// Parameters of the BDEW daily sigmoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Sigmoid {
    /// Daily demand factor `h` at the given (weighted) daily temperature.
    pub fn daily_factor(&self, temperature_c: f64) -> f64 {
        let t = if temperature_c > MAX_EVALUATED_TEMPERATURE_C {
            MAX_EVALUATED_TEMPERATURE_C
        } else {
            temperature_c
        };
        self.a / (1.0 + (self.b / (t - REFERENCE_TEMPERATURE_C)).powf(self.c)) + self.d
    }
}

const fn sig(a: f64, b: f64, c: f64, d: f64) -> Sigmoid {
    Sigmoid { a, b, c, d }
}

/// Sigmoid parameters for a profile type and wind class.
///
/// Without hot water the constant offset `d` is dropped.
pub fn sigmoid(shlp_type: ShlpType, wind_class: WindClass, hot_water: bool) -> Sigmoid {
    let (normal, windy) = match shlp_type {
        ShlpType::Efh => (
            sig(1.6209544, -37.1833141, 5.6727847, 0.0716431),
            sig(1.7566520, -37.1833141, 5.3130287, 0.0631242),
        ),
        ShlpType::Mfh => (
            sig(1.2328655, -34.7213605, 5.8164304, 0.0873352),
            sig(1.3427470, -34.7213605, 5.4547382, 0.0771209),
        ),
        ShlpType::Ghd => (
            sig(1.3010623, -35.6816144, 6.6857976, 0.1409267),
            sig(1.4180253, -35.6816144, 6.2546102, 0.1247930),
        ),
        ShlpType::Gko => (
            sig(1.3819663, -35.2503212, 6.1612434, 0.0968281),
            sig(1.5066422, -35.2503212, 5.7811347, 0.0855108),
        ),
        ShlpType::Gha => (
            sig(1.4596903, -36.1704214, 5.9226457, 0.0775549),
            sig(1.5887041, -36.1704214, 5.5591326, 0.0684721),
        ),
        ShlpType::Gmk => (
            sig(1.4023124, -35.3022461, 5.3521432, 0.1062810),
            sig(1.5289547, -35.3022461, 5.0211038, 0.0938457),
        ),
        ShlpType::Gbd => (
            sig(1.4943000, -36.6078453, 7.3211870, 0.0620138),
            sig(1.6287413, -36.6078453, 6.8640274, 0.0547362),
        ),
    };
    let mut params = match wind_class {
        WindClass::Normal => normal,
        WindClass::Windy => windy,
    };
    if !hot_water {
        params.d = 0.0;
    }
    params
}

/// Weekday factors, Monday first.
const WEEKDAY_FLAT: [f64; 7] = [1.0; 7];
const WEEKDAY_GHD: [f64; 7] = [1.0358, 1.0232, 1.0252, 1.0295, 1.0253, 0.9675, 0.8935];
const WEEKDAY_GKO: [f64; 7] = [1.0354, 1.0523, 1.0449, 1.0494, 0.9885, 0.8860, 0.9435];
const WEEKDAY_GHA: [f64; 7] = [1.08, 1.04, 1.04, 1.04, 1.05, 0.95, 0.80];
const WEEKDAY_GMK: [f64; 7] = [1.033, 1.041, 1.034, 1.028, 1.001, 0.956, 0.907];
const WEEKDAY_GBD: [f64; 7] = [1.1052, 1.0857, 1.0378, 1.0622, 1.0266, 0.7629, 0.9196];

/// Weekday factor `F` for `weekday` 1 (Monday) to 7 (Sunday or holiday).
///
/// Out-of-range weekdays are treated as Sunday.
pub fn weekday_factor(shlp_type: ShlpType, weekday: u8) -> f64 {
    let table = match shlp_type {
        ShlpType::Efh | ShlpType::Mfh => &WEEKDAY_FLAT,
        ShlpType::Ghd => &WEEKDAY_GHD,
        ShlpType::Gko => &WEEKDAY_GKO,
        ShlpType::Gha => &WEEKDAY_GHA,
        ShlpType::Gmk => &WEEKDAY_GMK,
        ShlpType::Gbd => &WEEKDAY_GBD,
    };
    table[usize::from(weekday.clamp(1, 7)) - 1]
}

type DayShape = [f64; 24];

const EFH_COLD: DayShape = [
    2.6, 2.5, 2.5, 2.5, 2.7, 3.4, 4.9, 5.6, 5.3, 4.6, 4.2, 4.0, 3.9, 3.8, 3.8, 3.9, 4.3, 4.9, 5.3,
    5.2, 4.8, 4.3, 3.6, 3.0,
];
const EFH_WARM: DayShape = [
    1.2, 1.0, 0.9, 0.9, 1.1, 2.4, 6.0, 7.8, 6.6, 5.3, 4.6, 4.4, 4.5, 4.2, 3.9, 3.9, 4.4, 5.4, 6.4,
    6.6, 5.9, 4.8, 3.2, 2.0,
];
const MFH_COLD: DayShape = [
    2.9, 2.8, 2.8, 2.8, 3.0, 3.5, 4.6, 5.1, 4.9, 4.5, 4.2, 4.1, 4.0, 3.9, 3.9, 4.0, 4.3, 4.7, 5.0,
    5.0, 4.7, 4.3, 3.8, 3.2,
];
const MFH_WARM: DayShape = [
    1.6, 1.4, 1.3, 1.3, 1.5, 2.6, 5.4, 6.9, 6.1, 5.1, 4.6, 4.4, 4.4, 4.2, 4.0, 4.0, 4.4, 5.2, 5.9,
    6.1, 5.6, 4.7, 3.4, 2.4,
];
const WORKDAY_COLD: DayShape = [
    2.2, 2.2, 2.2, 2.3, 2.6, 3.8, 5.6, 6.6, 6.4, 5.9, 5.5, 5.2, 5.0, 5.0, 4.9, 4.8, 4.6, 4.1, 3.5,
    3.0, 2.7, 2.5, 2.4, 2.3,
];
const WORKDAY_WARM: DayShape = [
    0.9, 0.8, 0.8, 0.9, 1.2, 2.6, 6.0, 8.2, 8.0, 7.2, 6.6, 6.2, 5.8, 5.7, 5.5, 5.2, 4.8, 3.9, 2.9,
    2.1, 1.6, 1.3, 1.1, 1.0,
];
const RESTDAY_COLD: DayShape = [
    3.6, 3.6, 3.6, 3.7, 3.8, 4.0, 4.3, 4.5, 4.6, 4.6, 4.5, 4.4, 4.3, 4.2, 4.2, 4.2, 4.2, 4.2, 4.1,
    4.0, 3.9, 3.8, 3.7, 3.6,
];
const RESTDAY_WARM: DayShape = [
    3.2, 3.1, 3.1, 3.1, 3.2, 3.5, 4.0, 4.6, 5.0, 5.2, 5.2, 5.1, 5.0, 4.9, 4.8, 4.7, 4.6, 4.4, 4.1,
    3.9, 3.7, 3.5, 3.4, 3.3,
];

/// Hour factors `SF` of one profile, indexed by day kind, band and hour.
///
/// Every (day kind, band) column sums to 1 over the 24 hours.
#[derive(Debug, Clone, PartialEq)]
pub struct HourFactors {
    workday: [DayShape; INTERVALS],
    restday: [DayShape; INTERVALS],
}

impl HourFactors {
    /// Hour factors for a profile type.
    ///
    /// Residential profiles use one shape for all days, flattened a little
    /// for each building class above 1. Commercial profiles distinguish
    /// workdays (Monday to Friday) from weekends and holidays.
    pub fn for_type(shlp_type: ShlpType, building_class: Option<BuildingClass>) -> Self {
        match shlp_type {
            ShlpType::Efh | ShlpType::Mfh => {
                let (cold, warm) = if shlp_type == ShlpType::Efh {
                    (EFH_COLD, EFH_WARM)
                } else {
                    (MFH_COLD, MFH_WARM)
                };
                let class = building_class.map_or(1, BuildingClass::get);
                let damp = CLASS_DAMPING_STEP * f64::from(class.saturating_sub(1));
                let mut bands = banded(&cold, &warm);
                for band in &mut bands {
                    for value in band.iter_mut() {
                        *value = (1.0 - damp) * *value + damp / 24.0;
                    }
                }
                Self {
                    workday: bands,
                    restday: bands,
                }
            }
            _ => Self {
                workday: banded(&WORKDAY_COLD, &WORKDAY_WARM),
                restday: banded(&RESTDAY_COLD, &RESTDAY_WARM),
            },
        }
    }

    /// Factor for `hour` (0..24) on a day of kind `weekday` (1..=7) in
    /// temperature band `interval` (1..=10).
    pub fn factor(&self, weekday: u8, hour: usize, interval: u8) -> f64 {
        let band = usize::from(interval.clamp(1, INTERVALS as u8)) - 1;
        let shapes = if weekday <= 5 { &self.workday } else { &self.restday };
        shapes[band][hour % 24]
    }
}

fn normalized(shape: &DayShape) -> DayShape {
    let total: f64 = shape.iter().sum();
    (*shape).map(|v| v / total)
}

/// Blends a cold-day shape (band 1) into a warm-day shape (band 10).
fn banded(cold: &DayShape, warm: &DayShape) -> [DayShape; INTERVALS] {
    let cold = normalized(cold);
    let warm = normalized(warm);
    std::array::from_fn(|band| {
        let w = band as f64 / (INTERVALS - 1) as f64;
        std::array::from_fn(|hour| (1.0 - w) * cold[hour] + w * warm[hour])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn daily_factor_falls_with_temperature() {
        for shlp in ShlpType::ALL {
            let s = sigmoid(shlp, WindClass::Normal, true);
            let cold = s.daily_factor(-10.0);
            let mild = s.daily_factor(5.0);
            let warm = s.daily_factor(20.0);
            assert!(cold > mild && mild > warm, "{shlp}: {cold} {mild} {warm}");
        }
    }

    #[test]
    fn daily_factor_is_finite_at_reference_temperature() {
        let s = sigmoid(ShlpType::Ghd, WindClass::Normal, true);
        assert!(s.daily_factor(40.0).is_finite());
        assert!(s.daily_factor(45.0).is_finite());
    }

    #[test]
    fn no_hot_water_drops_offset() {
        let with = sigmoid(ShlpType::Efh, WindClass::Normal, true);
        let without = sigmoid(ShlpType::Efh, WindClass::Normal, false);
        assert_eq!(without.d, 0.0);
        assert_relative_eq!(with.daily_factor(0.0) - without.daily_factor(0.0), with.d, epsilon = 1e-12);
    }

    #[test]
    fn windy_sites_react_more_in_the_cold() {
        let normal = sigmoid(ShlpType::Mfh, WindClass::Normal, true);
        let windy = sigmoid(ShlpType::Mfh, WindClass::Windy, true);
        assert!(windy.daily_factor(-10.0) > normal.daily_factor(-10.0));
    }

    #[test]
    fn weekday_factors() {
        assert_eq!(weekday_factor(ShlpType::Efh, 7), 1.0);
        assert_eq!(weekday_factor(ShlpType::Ghd, 1), 1.0358);
        assert_eq!(weekday_factor(ShlpType::Ghd, 7), 0.8935);
        assert_eq!(weekday_factor(ShlpType::Gha, 9), 0.80);
    }

    #[test]
    fn hour_factor_columns_sum_to_one() {
        let cases = [
            (ShlpType::Efh, BuildingClass::try_from(1u8).ok()),
            (ShlpType::Mfh, BuildingClass::try_from(11u8).ok()),
            (ShlpType::Ghd, None),
            (ShlpType::Gbd, None),
        ];
        for (shlp, class) in cases {
            let sf = HourFactors::for_type(shlp, class);
            for weekday in 1..=7 {
                for interval in 1..=10 {
                    let total: f64 = (0..24).map(|h| sf.factor(weekday, h, interval)).sum();
                    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn building_class_flattens_residential_shape() {
        let class1 = HourFactors::for_type(ShlpType::Efh, BuildingClass::try_from(1u8).ok());
        let class11 = HourFactors::for_type(ShlpType::Efh, BuildingClass::try_from(11u8).ok());
        let spread = |sf: &HourFactors| {
            let values: Vec<f64> = (0..24).map(|h| sf.factor(1, h, 10)).collect();
            let max = values.iter().cloned().fold(f64::MIN, f64::max);
            let min = values.iter().cloned().fold(f64::MAX, f64::min);
            max - min
        };
        assert!(spread(&class11) < spread(&class1));
    }

    #[test]
    fn commercial_weekend_differs_from_workday() {
        let sf = HourFactors::for_type(ShlpType::Gko, None);
        assert_ne!(sf.factor(3, 7, 5), sf.factor(7, 7, 5));
        assert_eq!(sf.factor(6, 7, 5), sf.factor(7, 7, 5));
    }
}
