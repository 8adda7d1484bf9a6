use rand::{Rng, SeedableRng, rngs::StdRng};

use super::TemperatureSeries;

/// Day of year (0-based) with the lowest seasonal temperature.
const COLDEST_DAY: f64 = 20.0;
/// Hour of day with the highest diurnal temperature.
const WARMEST_HOUR: f64 = 15.0;
/// Length of the seasonal cycle in hours.
const HOURS_PER_YEAR: f64 = 8760.0;

/// A synthetic outdoor temperature generator.
///
/// `SyntheticTemperature` combines a seasonal sinusoid, a diurnal sinusoid
/// and a weather anomaly that evolves as an AR(1) process:
/// ```text
/// anomaly(t) = alpha * anomaly(t-1) + epsilon(t)
/// ```
/// where `epsilon` is Gaussian noise. Identical seeds yield identical series.
///
/// # Examples
///
/// ```
/// use heat_demand::weather::SyntheticTemperature;
///
/// let mut generator = SyntheticTemperature::temperate(42);
/// let series = generator.series(8760);
/// assert_eq!(series.len(), 8760);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticTemperature {
    /// Annual mean temperature in °C.
    pub mean_c: f64,

    /// Seasonal half-range in °C.
    pub seasonal_amp_c: f64,

    /// Diurnal half-range in °C.
    pub diurnal_amp_c: f64,

    /// AR(1) persistence of the weather anomaly (0.0–1.0).
    pub alpha: f64,

    /// Standard deviation of the anomaly innovation in °C.
    pub noise_std: f64,

    /// Current anomaly state.
    anomaly: f64,

    /// Random number generator for the innovations.
    rng: StdRng,
}

impl SyntheticTemperature {
    /// Creates a new generator.
    ///
    /// # Arguments
    ///
    /// * `mean_c` - Annual mean temperature in °C
    /// * `seasonal_amp_c` - Seasonal half-range in °C
    /// * `diurnal_amp_c` - Diurnal half-range in °C
    /// * `alpha` - AR(1) persistence, clamped to \[0, 1\]
    /// * `noise_std` - Innovation standard deviation in °C
    /// * `seed` - Random seed for reproducible series
    pub fn new(
        mean_c: f64,
        seasonal_amp_c: f64,
        diurnal_amp_c: f64,
        alpha: f64,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        Self {
            mean_c,
            seasonal_amp_c: seasonal_amp_c.abs(),
            diurnal_amp_c: diurnal_amp_c.abs(),
            alpha: alpha.clamp(0.0, 1.0),
            noise_std: noise_std.max(0.0),
            anomaly: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Maritime mid-latitude climate, roughly that of southern Britain.
    pub fn temperate(seed: u64) -> Self {
        Self::new(10.0, 6.5, 3.0, 0.97, 0.5, seed)
    }

    /// Temperature in °C for the given hour of the year.
    ///
    /// Advances the anomaly state, so calls must be made in hour order.
    pub fn temperature_c(&mut self, hour_of_year: usize) -> f64 {
        let hour = hour_of_year as f64;
        let season_angle = 2.0 * std::f64::consts::PI * (hour - COLDEST_DAY * 24.0) / HOURS_PER_YEAR;
        let day_angle = 2.0 * std::f64::consts::PI * ((hour % 24.0) - WARMEST_HOUR) / 24.0;

        let epsilon = gaussian_noise(&mut self.rng, self.noise_std);
        self.anomaly = self.alpha * self.anomaly + epsilon;

        self.mean_c - self.seasonal_amp_c * season_angle.cos()
            + self.diurnal_amp_c * day_angle.cos()
            + self.anomaly
    }

    /// Generates `hours` consecutive readings starting at hour zero.
    pub fn series(&mut self, hours: usize) -> TemperatureSeries {
        TemperatureSeries::new((0..hours).map(|h| self.temperature_c(h)).collect())
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
