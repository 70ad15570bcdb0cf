use crate::services::weather_service::WeatherError as UiWeatherError;
use skycast_core::{AppError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::EmptyCity => AppError::Weather(WeatherError::CityRequired),
            UiWeatherError::Rejected { code, message } => {
                AppError::Weather(WeatherError::Rejected { code, message })
            }
            UiWeatherError::Unavailable(s) => AppError::Weather(WeatherError::Unavailable(s)),
        }
    }
}
