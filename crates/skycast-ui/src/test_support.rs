//! Shared fixtures for unit tests.

use chrono::DateTime;
use skycast_weather::{Coordinates, CurrentWeather, ForecastEntry, IconCode, WeatherReport};

/// London at `temp`°C with `samples` forecast entries, 3 hours apart,
/// starting Tuesday 2023-11-14 23:00 UTC.
pub(crate) fn london_report_with(temp: f64, samples: usize) -> WeatherReport {
    WeatherReport {
        current: CurrentWeather {
            name: "London".into(),
            country: "GB".into(),
            coordinates: Coordinates {
                lat: 51.5085,
                lon: -0.1257,
            },
            description: "light rain".into(),
            icon: IconCode("10d".into()),
            temperature: temp,
            feels_like: 14.6,
            humidity: 81,
            wind_speed: 4.63,
            pressure: 1012,
            visibility: 10000,
            cloudiness: 75,
        },
        forecast: (0..samples)
            .map(|i| ForecastEntry {
                timestamp: DateTime::from_timestamp(1_700_002_800 + i as i64 * 10_800, 0)
                    .unwrap_or_default(),
                temperature: 10.0 + i as f64,
                icon: IconCode("03d".into()),
                description: "scattered clouds".into(),
            })
            .collect(),
    }
}

pub(crate) fn london_report(temp: f64) -> WeatherReport {
    london_report_with(temp, 40)
}
