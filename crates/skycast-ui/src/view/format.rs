//! Display formatting shared by the tabs.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `15.3` -> `"15°C"`
pub fn celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

/// Short weekday (`"Tue"`) of `timestamp` in the viewer's local time zone.
pub fn short_weekday(timestamp: DateTime<Utc>) -> String {
    weekday_in(timestamp, &Local)
}

fn weekday_in<Tz>(timestamp: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(zone).format("%a").to_string()
}
