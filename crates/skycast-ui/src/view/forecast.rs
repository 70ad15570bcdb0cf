//! Daily projection of the 3-hour forecast.

use skycast_weather::ForecastEntry;

/// Samples per day at 3-hour resolution
pub const SAMPLES_PER_DAY: usize = 8;

/// Days shown on the forecast tab
pub const DAYS: usize = 5;

/// One sample per day: positions 0, 8, 16, 24, 32 of the chronological
/// sequence, in order. Shorter sequences yield fewer entries.
pub fn daily(forecast: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    forecast.iter().step_by(SAMPLES_PER_DAY).take(DAYS).collect()
}
