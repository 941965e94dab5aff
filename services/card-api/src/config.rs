//! Service configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";
pub const DEFAULT_COUNTRY: &str = "uk";

/// Runtime settings shared by every request. Resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    /// Provider key used when a request does not bring its own.
    pub api_key: Option<String>,
    pub weather_api_url: String,
    pub icon_base_url: String,
    pub cache_dir: PathBuf,
    /// Directory holding `Montserrat-Regular.ttf` and `Montserrat-Bold.ttf`.
    pub assets_dir: PathBuf,
    /// Country used for `/{city}` requests.
    pub default_country: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            cache_dir: PathBuf::from("cache"),
            assets_dir: PathBuf::from("assets"),
            default_country: DEFAULT_COUNTRY.to_string(),
            cache_ttl: storage::DEFAULT_TTL,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl CardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let seconds = |name: &str, fallback: Duration| -> Result<Duration> {
            match get(name) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a whole number of seconds, got {:?}", name, raw)),
                None => Ok(fallback),
            }
        };

        Ok(Self {
            api_key: get("API_KEY"),
            weather_api_url: get("WEATHER_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.weather_api_url),
            icon_base_url: get("ICON_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.icon_base_url),
            cache_dir: get("CACHE_DIR").map(PathBuf::from).unwrap_or(defaults.cache_dir),
            assets_dir: get("ASSETS_DIR").map(PathBuf::from).unwrap_or(defaults.assets_dir),
            default_country: get("DEFAULT_COUNTRY").unwrap_or(defaults.default_country),
            cache_ttl: seconds("CACHE_TTL_SECS", defaults.cache_ttl)?,
            request_timeout: seconds("REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
        })
    }
}
