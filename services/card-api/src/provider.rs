//! Weather provider adapter.
//!
//! Turns OpenWeatherMap current-conditions and one-call payloads into
//! [`WeatherSnapshot`] and [`DailyForecast`] records.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use card_common::{CardError, CardResult, DailyForecast, ForecastDay, WeatherSnapshot};

/// Metres per second to miles per hour.
const MPS_TO_MPH: f64 = 2.236_936;

/// Source of current conditions and daily forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for `location` in `country`.
    async fn current(
        &self,
        location: &str,
        country: &str,
        api_key: Option<&str>,
    ) -> CardResult<WeatherSnapshot>;

    /// Daily forecast for a coordinate; entry 0 is today.
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: Option<&str>,
    ) -> CardResult<DailyForecast>;
}

/// reqwest-backed OpenWeatherMap client.
pub struct OpenWeatherMapProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherMapProvider {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn key<'a>(&'a self, override_key: Option<&'a str>) -> CardResult<&'a str> {
        override_key
            .or(self.api_key.as_deref())
            .ok_or_else(|| CardError::Upstream("no provider API key configured".to_string()))
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> CardResult<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CardError::Upstream(format!("{} request failed: {}", path, e)))?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "Provider responded");
        // Error statuses still carry a JSON body with `cod`/`message`.
        let body = response
            .bytes()
            .await
            .map_err(|e| CardError::Upstream(format!("{} body read failed: {}", path, e)))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    #[instrument(skip(self, api_key))]
    async fn current(
        &self,
        location: &str,
        country: &str,
        api_key: Option<&str>,
    ) -> CardResult<WeatherSnapshot> {
        let key = self.key(api_key)?;
        let body = self
            .get_json(
                "weather",
                &[
                    ("q", format!("{},{}", location, country)),
                    ("units", "metric".to_string()),
                    ("appid", key.to_string()),
                ],
            )
            .await?;
        parse_current(&body)
    }

    #[instrument(skip(self, api_key))]
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: Option<&str>,
    ) -> CardResult<DailyForecast> {
        let key = self.key(api_key)?;
        let body = self
            .get_json(
                "onecall",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("exclude", "current,minutely,hourly".to_string()),
                    ("units", "metric".to_string()),
                    ("appid", key.to_string()),
                ],
            )
            .await?;
        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    coord: Coord,
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainReadings,
    #[serde(default)]
    wind: Option<Wind>,
    #[serde(default)]
    clouds: Option<Clouds>,
    #[serde(default)]
    sys: Option<Sys>,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    gust: Option<f64>,
    /// Usually a number, occasionally a numeric string.
    #[serde(default)]
    deg: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Clouds {
    #[serde(default)]
    all: f64,
}

#[derive(Debug, Deserialize)]
struct Sys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    daily: Vec<DailyEntry>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    dt: i64,
    temp: DailyTemp,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct DailyTemp {
    day: f64,
}

/// `cod` arrives as either `"404"` or `404`.
fn status_code(payload: &Value) -> Option<u64> {
    match payload.get("cod")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Map provider-reported errors before looking at the rest of the body.
fn check_status(payload: &Value) -> CardResult<()> {
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    match status_code(payload) {
        Some(404) => Err(CardError::NotFound(message)),
        Some(code) if !(200..300).contains(&code) => Err(CardError::Upstream(format!(
            "provider returned {}: {}",
            code, message
        ))),
        _ => Ok(()),
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a current-conditions body.
pub fn parse_current(body: &[u8]) -> CardResult<WeatherSnapshot> {
    let payload: Value = serde_json::from_slice(body)?;
    check_status(&payload)?;
    let raw: CurrentPayload = serde_json::from_value(payload)?;

    let condition = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| CardError::Upstream("current conditions carry no weather entry".to_string()))?;
    let (wind_speed_mph, wind_gust_mph, wind_degrees) = match raw.wind {
        Some(wind) => (
            wind.speed * MPS_TO_MPH,
            wind.gust.map(|g| g * MPS_TO_MPH),
            wind.deg.as_ref().and_then(number_like),
        ),
        None => (0.0, None, None),
    };

    Ok(WeatherSnapshot {
        location_name: raw.name,
        country_code: raw.sys.and_then(|s| s.country).unwrap_or_default(),
        latitude: raw.coord.lat,
        longitude: raw.coord.lon,
        condition_main: condition.main,
        condition_icon_id: condition.icon,
        cloud_coverage_pct: raw.clouds.map(|c| c.all).unwrap_or(0.0),
        temp_c: raw.main.temp,
        feels_like_c: raw.main.feels_like,
        pressure_hpa: raw.main.pressure,
        humidity_pct: raw.main.humidity,
        wind_speed_mph,
        wind_gust_mph,
        wind_degrees,
    })
}

/// Parse a one-call daily forecast body.
pub fn parse_forecast(body: &[u8]) -> CardResult<DailyForecast> {
    let payload: Value = serde_json::from_slice(body)?;
    check_status(&payload)?;
    let raw: ForecastPayload = serde_json::from_value(payload)?;

    let days = raw
        .daily
        .into_iter()
        .map(|entry| {
            let condition = entry.weather.into_iter().next().ok_or_else(|| {
                CardError::MalformedForecast(format!("day {} has no weather entry", entry.dt))
            })?;
            Ok(ForecastDay {
                epoch_seconds: entry.dt,
                temp_day_c: entry.temp.day,
                condition_main: condition.main,
                condition_icon_id: condition.icon,
            })
        })
        .collect::<CardResult<Vec<_>>>()?;

    Ok(DailyForecast::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_code_accepts_string_and_number() {
        assert_eq!(status_code(&json!({"cod": "404"})), Some(404));
        assert_eq!(status_code(&json!({"cod": 200})), Some(200));
        assert_eq!(status_code(&json!({})), None);
    }

    #[test]
    fn test_unauthorised_is_upstream() {
        let body = br#"{"cod": 401, "message": "Invalid API key"}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, CardError::Upstream(ref m) if m.contains("401")));
    }

    #[test]
    fn test_string_wind_direction_is_parsed() {
        assert_eq!(number_like(&json!("220")), Some(220.0));
        assert_eq!(number_like(&json!("east")), None);
    }
}
