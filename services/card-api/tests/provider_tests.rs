//! Provider payload parsing against recorded fixtures.

use card_api::provider::{parse_current, parse_forecast};
use card_common::CardError;
use test_utils::{
    assert_approx_eq, CURRENT_CONDITIONS_JSON, FIRST_DAY_EPOCH, FORECAST_JSON, NOT_FOUND_JSON,
    SHORT_FORECAST_JSON,
};

#[test]
fn test_current_conditions() {
    let snapshot = parse_current(CURRENT_CONDITIONS_JSON.as_bytes()).unwrap();
    assert_eq!(snapshot.location_name, "London");
    assert_eq!(snapshot.country_code, "GB");
    assert_eq!(snapshot.condition_main, "Clouds");
    assert_eq!(snapshot.condition_icon_id, "04d");
    assert_approx_eq!(snapshot.latitude, 51.5085, 1e-9);
    assert_approx_eq!(snapshot.temp_c, 14.6, 1e-9);
    assert_approx_eq!(snapshot.pressure_hpa, 1012.0, 1e-9);
    assert_approx_eq!(snapshot.cloud_coverage_pct, 75.0, 1e-9);
    assert_eq!(snapshot.wind_degrees, Some(240.0));
}

#[test]
fn test_wind_is_converted_to_mph() {
    let snapshot = parse_current(CURRENT_CONDITIONS_JSON.as_bytes()).unwrap();
    assert_approx_eq!(snapshot.wind_speed_mph, 10.357, 0.001);
    assert_approx_eq!(snapshot.wind_gust_mph.unwrap(), 19.573, 0.001);
    assert_eq!(snapshot.wind_label(), "10 mph (gusts 20 mph)");
}

#[test]
fn test_not_found_carries_provider_message() {
    let err = parse_current(NOT_FOUND_JSON.as_bytes()).unwrap_err();
    assert_eq!(err, CardError::NotFound("city not found".to_string()));
    assert_eq!(err.card_message(), "city not found");

    let numeric = parse_current(br#"{"cod": 404, "message": "nope"}"#).unwrap_err();
    assert!(numeric.is_not_found());
}

#[test]
fn test_garbage_and_missing_fields_are_upstream() {
    assert!(matches!(
        parse_current(b"<html>502 Bad Gateway</html>").unwrap_err(),
        CardError::Upstream(_)
    ));
    assert!(matches!(
        parse_current(br#"{"cod": 200, "name": "London"}"#).unwrap_err(),
        CardError::Upstream(_)
    ));
}

#[test]
fn test_forecast_keeps_order() {
    let forecast = parse_forecast(FORECAST_JSON.as_bytes()).unwrap();
    assert_eq!(forecast.days.len(), 8);
    assert_eq!(forecast.days[0].epoch_seconds, FIRST_DAY_EPOCH);

    let strip = forecast.strip_days().unwrap();
    let mains: Vec<&str> = strip.iter().map(|d| d.condition_main.as_str()).collect();
    assert_eq!(mains, vec!["Rain", "Clear", "Drizzle", "Snow"]);
    assert_eq!(strip[0].temperature_label(), "16°C");
}

#[test]
fn test_short_forecast_cannot_fill_strip() {
    let forecast = parse_forecast(SHORT_FORECAST_JSON.as_bytes()).unwrap();
    assert!(matches!(
        forecast.strip_days().unwrap_err(),
        CardError::MalformedForecast(_)
    ));
}

#[test]
fn test_forecast_without_daily_is_upstream() {
    assert!(matches!(
        parse_forecast(br#"{"lat": 1.0, "lon": 2.0}"#).unwrap_err(),
        CardError::Upstream(_)
    ));
}
