//! Weather records consumed by the card renderer.

use chrono::{DateTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::compass::compass_direction;
use crate::error::{CardError, CardResult};

/// Number of forecast days shown after today.
pub const FORECAST_STRIP_LEN: usize = 4;

/// Minimum number of daily entries a forecast must carry (today + strip).
const MIN_DAILY_ENTRIES: usize = FORECAST_STRIP_LEN + 1;

/// Cloud cover above which the percentage is appended to the condition.
const CLOUD_SUFFIX_THRESHOLD: f64 = 10.0;

/// Current conditions for one location, built once per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Short condition group, e.g. "Clouds".
    pub condition_main: String,
    /// Provider icon identifier, e.g. "04d".
    pub condition_icon_id: String,
    pub cloud_coverage_pct: f64,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub wind_speed_mph: f64,
    pub wind_gust_mph: Option<f64>,
    pub wind_degrees: Option<f64>,
}

impl WeatherSnapshot {
    /// `London, GB`
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.location_name, self.country_code)
    }

    pub fn temperature_label(&self) -> String {
        celsius_label(self.temp_c)
    }

    pub fn feels_like_label(&self) -> String {
        celsius_label(self.feels_like_c)
    }

    /// Condition with cloud cover appended when it is noticeable.
    pub fn condition_label(&self) -> String {
        if self.cloud_coverage_pct > CLOUD_SUFFIX_THRESHOLD {
            format!(
                "{} ({}%)",
                self.condition_main,
                round_half_up(self.cloud_coverage_pct)
            )
        } else {
            self.condition_main.clone()
        }
    }

    /// Wind speed, with gusts when they differ from the sustained speed.
    pub fn wind_label(&self) -> String {
        let speed = round_half_up(self.wind_speed_mph);
        match self.wind_gust_mph.map(round_half_up) {
            Some(gust) if gust != speed => format!("{} mph (gusts {} mph)", speed, gust),
            _ => format!("{} mph", speed),
        }
    }

    pub fn wind_direction(&self) -> &'static str {
        self.wind_degrees.map(compass_direction).unwrap_or("N")
    }

    pub fn pressure_label(&self) -> String {
        format!("{} hPa", round_half_up(self.pressure_hpa))
    }

    pub fn humidity_label(&self) -> String {
        format!("{}%", round_half_up(self.humidity_pct))
    }
}

/// One entry of the provider's daily forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub epoch_seconds: i64,
    pub temp_day_c: f64,
    pub condition_main: String,
    pub condition_icon_id: String,
}

impl ForecastDay {
    /// Day of the week for this entry in the given time zone.
    pub fn weekday_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<Weekday> {
        use chrono::Datelike;
        DateTime::from_timestamp(self.epoch_seconds, 0).map(|utc| utc.with_timezone(tz).weekday())
    }

    pub fn temperature_label(&self) -> String {
        celsius_label(self.temp_day_c)
    }
}

/// Ordered daily forecast; index 0 is today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub days: Vec<ForecastDay>,
}

impl DailyForecast {
    pub fn new(days: Vec<ForecastDay>) -> Self {
        Self { days }
    }

    /// The four days following today, in chronological order.
    pub fn strip_days(&self) -> CardResult<&[ForecastDay]> {
        if self.days.len() < MIN_DAILY_ENTRIES {
            return Err(CardError::MalformedForecast(format!(
                "expected at least {} daily entries, got {}",
                MIN_DAILY_ENTRIES,
                self.days.len()
            )));
        }
        Ok(&self.days[1..MIN_DAILY_ENTRIES])
    }
}

/// `12°C`, rounding halves towards positive infinity.
pub fn celsius_label(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

fn round_half_up(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "London".to_string(),
            country_code: "GB".to_string(),
            latitude: 51.51,
            longitude: -0.13,
            condition_main: "Clouds".to_string(),
            condition_icon_id: "04d".to_string(),
            cloud_coverage_pct: 75.0,
            temp_c: 12.5,
            feels_like_c: -0.4,
            pressure_hpa: 1012.0,
            humidity_pct: 81.0,
            wind_speed_mph: 9.2,
            wind_gust_mph: Some(15.7),
            wind_degrees: Some(220.0),
        }
    }

    fn day(epoch_seconds: i64) -> ForecastDay {
        ForecastDay {
            epoch_seconds,
            temp_day_c: 10.0,
            condition_main: "Rain".to_string(),
            condition_icon_id: "10d".to_string(),
        }
    }

    #[test]
    fn test_labels() {
        let s = snapshot();
        assert_eq!(s.location_label(), "London, GB");
        assert_eq!(s.temperature_label(), "13°C");
        assert_eq!(s.feels_like_label(), "0°C");
        assert_eq!(s.condition_label(), "Clouds (75%)");
        assert_eq!(s.pressure_label(), "1012 hPa");
        assert_eq!(s.humidity_label(), "81%");
        assert_eq!(s.wind_direction(), "SW");
    }

    #[test]
    fn test_low_cloud_cover_has_no_suffix() {
        let mut s = snapshot();
        s.cloud_coverage_pct = 10.0;
        assert_eq!(s.condition_label(), "Clouds");
    }

    #[test]
    fn test_wind_with_gusts() {
        let s = snapshot();
        assert_eq!(s.wind_label(), "9 mph (gusts 16 mph)");
    }

    #[test]
    fn test_wind_gust_equal_to_speed_is_hidden() {
        let mut s = snapshot();
        s.wind_gust_mph = Some(9.4);
        assert_eq!(s.wind_label(), "9 mph");
        s.wind_gust_mph = None;
        assert_eq!(s.wind_label(), "9 mph");
    }

    #[test]
    fn test_missing_wind_bearing_is_north() {
        let mut s = snapshot();
        s.wind_degrees = None;
        assert_eq!(s.wind_direction(), "N");
    }

    #[test]
    fn test_strip_days_skips_today() {
        let forecast = DailyForecast::new((0..8).map(|i| day(i * 86_400)).collect());
        let strip = forecast.strip_days().unwrap();
        assert_eq!(strip.len(), FORECAST_STRIP_LEN);
        assert_eq!(strip[0].epoch_seconds, 86_400);
        assert_eq!(strip[3].epoch_seconds, 4 * 86_400);
    }

    #[test]
    fn test_short_forecast_is_malformed() {
        let forecast = DailyForecast::new((0..4).map(|i| day(i * 86_400)).collect());
        assert!(matches!(
            forecast.strip_days(),
            Err(CardError::MalformedForecast(_))
        ));
    }

    #[test]
    fn test_weekday_in_utc() {
        // 2024-01-15 12:00:00 UTC was a Monday.
        let d = day(1_705_320_000);
        assert_eq!(d.weekday_in(&Utc), Some(Weekday::Mon));
    }
}
