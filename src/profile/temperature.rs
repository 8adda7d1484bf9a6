use crate::index::HourlyIndex;

/// Normalizing denominator of the geometric series: 1 + ½ + ¼ + ⅛.
const GEOMETRIC_WEIGHT_SUM: f64 = 1.875;

/// Daily mean temperatures together with the day each hour belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTemperatures {
    /// Mean temperature per calendar day, in index order.
    pub means: Vec<f64>,
    /// Position in `means` for every hour of the index.
    day_of_hour: Vec<usize>,
}

impl DailyTemperatures {
    /// Groups hourly readings by calendar day.
    ///
    /// `hourly` must have the same length as `index`; extra readings are
    /// ignored and missing readings shorten the last day.
    pub fn new(index: &HourlyIndex, hourly: &[f64]) -> Self {
        let first_day = index.start().date();
        let mut sums: Vec<(f64, usize)> = Vec::new();
        let mut day_of_hour = Vec::with_capacity(index.len());

        for (ts, &t) in index.iter().zip(hourly) {
            let day = usize::try_from((ts.date() - first_day).num_days()).unwrap_or(0);
            if sums.len() <= day {
                sums.resize(day + 1, (0.0, 0));
            }
            sums[day].0 += t;
            sums[day].1 += 1;
            day_of_hour.push(day);
        }

        let means = sums
            .into_iter()
            .map(|(sum, n)| if n > 0 { sum / n as f64 } else { f64::NAN })
            .collect();
        Self { means, day_of_hour }
    }

    /// Day position of hour `i`.
    pub fn day_of_hour(&self, i: usize) -> usize {
        self.day_of_hour[i]
    }
}

/// Blends each day with the three previous days using weights 1, ½, ¼, ⅛.
///
/// The series wraps around, so the first days of the year borrow from the
/// last days.
pub fn geometric_series(daily: &[f64]) -> Vec<f64> {
    let n = daily.len();
    let lag = |d: usize, k: usize| daily[(d + n - k % n) % n];
    (0..n)
        .map(|d| {
            (daily[d] + 0.5 * lag(d, 1) + 0.25 * lag(d, 2) + 0.125 * lag(d, 3))
                / GEOMETRIC_WEIGHT_SUM
        })
        .collect()
}

/// Temperature band 1..=10 used to select hour factors.
///
/// Bands are 5 K wide on the rounded-up temperature: up to −15 °C is band 1,
/// −14..−10 band 2, and so on until 26 °C and above in band 10.
pub fn interval(temperature_c: f64) -> u8 {
    if temperature_c.is_nan() {
        return 1;
    }
    let rounded = temperature_c.ceil().clamp(-1000.0, 1000.0) as i64;
    ((rounded + 19).div_euclid(5) + 1).clamp(1, 10) as u8
}
