//! Common types and utilities shared across the weather-card crates.

pub mod calendar;
pub mod compass;
pub mod device;
pub mod error;
pub mod request;
pub mod weather;

pub use calendar::{format_long_date, format_short_date, short_weekday_name, weekday_name};
pub use compass::{compass_direction, compass_direction_from_str, compass_direction_from_value};
pub use device::DeviceClass;
pub use error::{CardError, CardResult, GENERIC_FAILURE_MESSAGE, UNKNOWN_CITY_MESSAGE};
pub use request::{normalize_component, RenderRequest};
pub use weather::{DailyForecast, ForecastDay, WeatherSnapshot, FORECAST_STRIP_LEN};
