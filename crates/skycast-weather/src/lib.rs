//! Weather data for SkyCast
//!
//! Fetches current conditions and the 5-day / 3-hour forecast for a city from
//! the OpenWeatherMap API, in metric units.

mod api;
pub mod client;
pub mod types;

pub use client::{OpenWeatherClient, DEFAULT_BASE_URL};
pub use types::*;
