//! Provider payloads and sample records for card tests.
//!
//! The JSON mirrors the OpenWeatherMap responses the service consumes.
//! Daily entries start on Saturday 2026-10-17 at 12:00 UTC.

use card_common::{DailyForecast, ForecastDay, WeatherSnapshot};
use chrono::NaiveDate;

/// First daily timestamp in [`FORECAST_JSON`].
pub const FIRST_DAY_EPOCH: i64 = 1_792_238_400;

const DAY_SECONDS: i64 = 86_400;

/// Current conditions for London.
pub const CURRENT_CONDITIONS_JSON: &str = r#"{
  "coord": {"lon": -0.1257, "lat": 51.5085},
  "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
  "main": {"temp": 14.6, "feels_like": 13.9, "pressure": 1012, "humidity": 72},
  "wind": {"speed": 4.63, "deg": 240, "gust": 8.75},
  "clouds": {"all": 75},
  "sys": {"country": "GB"},
  "name": "London",
  "cod": 200
}"#;

/// Provider answer for an unknown city.
pub const NOT_FOUND_JSON: &str = r#"{"cod": "404", "message": "city not found"}"#;

/// One-call daily forecast, eight entries.
pub const FORECAST_JSON: &str = r#"{
  "lat": 51.5085,
  "lon": -0.1257,
  "timezone": "Europe/London",
  "timezone_offset": 3600,
  "daily": [
    {"dt": 1792238400, "temp": {"day": 14.2}, "weather": [{"main": "Clouds", "icon": "04d"}]},
    {"dt": 1792324800, "temp": {"day": 15.5}, "weather": [{"main": "Rain", "icon": "10d"}]},
    {"dt": 1792411200, "temp": {"day": 12.4}, "weather": [{"main": "Clear", "icon": "01d"}]},
    {"dt": 1792497600, "temp": {"day": 11.0}, "weather": [{"main": "Drizzle", "icon": "09d"}]},
    {"dt": 1792584000, "temp": {"day": 9.6}, "weather": [{"main": "Snow", "icon": "13d"}]},
    {"dt": 1792670400, "temp": {"day": 10.1}, "weather": [{"main": "Clouds", "icon": "03d"}]},
    {"dt": 1792756800, "temp": {"day": 13.3}, "weather": [{"main": "Clear", "icon": "01d"}]},
    {"dt": 1792843200, "temp": {"day": 12.8}, "weather": [{"main": "Rain", "icon": "10d"}]}
  ]
}"#;

/// Forecast with too few daily entries to fill the strip.
pub const SHORT_FORECAST_JSON: &str = r#"{
  "lat": 51.5085,
  "lon": -0.1257,
  "daily": [
    {"dt": 1792238400, "temp": {"day": 14.2}, "weather": [{"main": "Clouds", "icon": "04d"}]},
    {"dt": 1792324800, "temp": {"day": 15.5}, "weather": [{"main": "Rain", "icon": "10d"}]}
  ]
}"#;

/// Date the fixtures are anchored on.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid reference date")
}

/// Snapshot matching [`CURRENT_CONDITIONS_JSON`] with wind in mph.
pub fn sample_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location_name: "London".to_string(),
        country_code: "GB".to_string(),
        latitude: 51.5085,
        longitude: -0.1257,
        condition_main: "Clouds".to_string(),
        condition_icon_id: "04d".to_string(),
        cloud_coverage_pct: 75.0,
        temp_c: 14.6,
        feels_like_c: 13.9,
        pressure_hpa: 1012.0,
        humidity_pct: 72.0,
        wind_speed_mph: 10.36,
        wind_gust_mph: Some(19.57),
        wind_degrees: Some(240.0),
    }
}

/// A daily forecast of `len` entries starting on the reference date.
pub fn sample_forecast(len: usize) -> DailyForecast {
    let conditions = [("Clouds", "04d"), ("Rain", "10d"), ("Clear", "01d"), ("Snow", "13d")];
    let days = (0..len)
        .map(|i| {
            let (main, icon) = conditions[i % conditions.len()];
            ForecastDay {
                epoch_seconds: FIRST_DAY_EPOCH + i as i64 * DAY_SECONDS,
                temp_day_c: 10.0 + i as f64,
                condition_main: main.to_string(),
                condition_icon_id: icon.to_string(),
            }
        })
        .collect();
    DailyForecast::new(days)
}
