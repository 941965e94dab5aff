//! Fakes shared by the service tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use card_api::config::CardConfig;
use card_api::icons::IconSource;
use card_api::provider::{parse_current, parse_forecast, WeatherProvider};
use card_api::state::AppState;
use card_common::{CardError, CardResult, DailyForecast, WeatherSnapshot};
use renderer::Fonts;
use storage::SystemClock;
use test_utils::{sample_icon_png, temp_test_dir, CURRENT_CONDITIONS_JSON, FORECAST_JSON};

pub const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/118.0";
pub const MOBILE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

/// In-memory provider that records what it was asked for.
pub struct FakeProvider {
    current: CardResult<WeatherSnapshot>,
    forecast: CardResult<DailyForecast>,
    delay: Duration,
    pub current_calls: AtomicUsize,
    pub forecast_calls: AtomicUsize,
    pub queries: Mutex<Vec<(String, String, Option<String>)>>,
}

impl FakeProvider {
    pub fn london() -> Self {
        Self::new(
            parse_current(CURRENT_CONDITIONS_JSON.as_bytes()),
            parse_forecast(FORECAST_JSON.as_bytes()),
        )
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(
            Err(CardError::NotFound(message.to_string())),
            parse_forecast(FORECAST_JSON.as_bytes()),
        )
    }

    pub fn new(current: CardResult<WeatherSnapshot>, forecast: CardResult<DailyForecast>) -> Self {
        Self {
            current,
            forecast,
            delay: Duration::ZERO,
            current_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(
        &self,
        location: &str,
        country: &str,
        api_key: Option<&str>,
    ) -> CardResult<WeatherSnapshot> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push((
            location.to_string(),
            country.to_string(),
            api_key.map(str::to_string),
        ));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.current.clone()
    }

    async fn forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
        _api_key: Option<&str>,
    ) -> CardResult<DailyForecast> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.forecast.clone()
    }
}

/// Serves the same generated icon for every id, except `fail_on`.
///
/// Tracks how many fetches were in progress at once.
pub struct FakeIcons {
    pub fail_on: Option<String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
    active: AtomicUsize,
    pub peak_active: AtomicUsize,
}

impl FakeIcons {
    pub fn ok() -> Self {
        Self {
            fail_on: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            peak_active: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(icon_id: &str) -> Self {
        Self {
            fail_on: Some(icon_id.to_string()),
            ..Self::ok()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak_active(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IconSource for FakeIcons {
    async fn fetch(&self, icon_id: &str) -> CardResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_active.fetch_max(now_active, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.as_deref() == Some(icon_id) {
            return Err(CardError::Upstream(format!("icon {} unavailable", icon_id)));
        }
        Ok(Bytes::from(sample_icon_png()))
    }
}

/// State backed by fakes and a fresh temp cache directory.
pub fn test_state(
    provider: Arc<FakeProvider>,
    icons: Arc<FakeIcons>,
) -> (Arc<AppState>, tempfile::TempDir) {
    let dir = temp_test_dir();
    let state = test_state_in(provider, icons, dir.path().to_path_buf());
    (state, dir)
}

/// State backed by fakes, caching under `cache_dir`.
pub fn test_state_in(
    provider: Arc<FakeProvider>,
    icons: Arc<FakeIcons>,
    cache_dir: PathBuf,
) -> Arc<AppState> {
    let config = CardConfig {
        cache_dir,
        ..CardConfig::default()
    };
    let state = AppState::with_parts(
        config,
        provider,
        icons,
        Fonts::bundled(),
        Arc::new(SystemClock),
    );
    Arc::new(state)
}
