//! Synthetic reef observation generator.
//!
//! All reefs share one seasonal sea-surface temperature curve plus Gaussian
//! noise; location does not enter the model. DHW and the risk category are
//! derived from that temperature.

use std::f64::consts::PI;

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::Result;
use crate::models::{BleachingRisk, ReefObservation, SIMULATED_SOURCE};
use crate::reefs::ReefSite;

// ---

/// Annual mean SST (°C).
pub const BASE_SST: f64 = 26.0;
/// Amplitude of the seasonal sinusoid (°C).
pub const SEASONAL_AMPLITUDE: f64 = 2.0;
/// Standard deviation of the daily noise (°C).
pub const NOISE_STDDEV: f64 = 0.5;
/// Temperature above which heat stress accumulates (°C).
pub const BLEACHING_THRESHOLD: f64 = 27.0;
/// Days of history before `today`; the window holds `WINDOW_DAYS + 1` dates.
pub const WINDOW_DAYS: i64 = 30;

/// Noise-free SST for a date: `26 + 2·sin(2π·doy/365)`, 1-based day of year.
pub fn seasonal_sst(date: NaiveDate) -> f64 {
    // ---
    let day_of_year = date.ordinal() as f64;
    BASE_SST + SEASONAL_AMPLITUDE * (2.0 * PI * day_of_year / 365.0).sin()
}

/// Simplified degree heating weeks: `(sst - 27) * 7` above the threshold,
/// zero otherwise.
pub fn degree_heating_weeks(sst: f64) -> f64 {
    // ---
    if sst > BLEACHING_THRESHOLD {
        (sst - BLEACHING_THRESHOLD) * 7.0
    } else {
        0.0
    }
}

/// Round to two decimal places, matching the `DECIMAL(5,2)` columns.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every date from `today - 30` through `today`, ascending.
pub fn observation_window(today: NaiveDate) -> Vec<NaiveDate> {
    // ---
    let start = today - Duration::days(WINDOW_DAYS);
    start.iter_days().take_while(|d| *d <= today).collect()
}

/// Generate one observation per (reef, day) over the trailing window.
///
/// Output is grouped by reef (registry order), then by ascending date.
/// Pass a seeded RNG for reproducible temperatures.
pub fn generate_observations<R>(
    sites: &[ReefSite],
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<ReefObservation>>
where
    R: Rng + ?Sized,
{
    // ---
    let noise = Normal::new(0.0, NOISE_STDDEV)?;
    let window = observation_window(today);
    let mut observations = Vec::with_capacity(sites.len() * window.len());

    for site in sites {
        for &date in &window {
            let sst = seasonal_sst(date) + noise.sample(rng);
            let dhw = degree_heating_weeks(sst);

            observations.push(ReefObservation {
                reef_id: site.id.to_string(),
                reef_name: site.name.to_string(),
                latitude: site.latitude,
                longitude: site.longitude,
                country: site.country.to_string(),
                date,
                sst_celsius: round2(sst),
                dhw_value: round2(dhw),
                bleaching_risk: BleachingRisk::from_dhw(dhw),
                data_source: SIMULATED_SOURCE.to_string(),
            });
        }
    }

    tracing::debug!(
        "Generated {} observations for {} reefs over {} days ending {}",
        observations.len(),
        sites.len(),
        window.len(),
        today
    );

    Ok(observations)
}
