//! Application state and shared resources.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use card_common::CardResult;
use renderer::Fonts;
use storage::{CardCache, Clock, SingleFlight, SystemClock};

use crate::config::CardConfig;
use crate::icons::{HttpIconSource, IconSource};
use crate::provider::{OpenWeatherMapProvider, WeatherProvider};
use crate::rendering::RenderedCard;

/// Shared application state. Read-only after startup apart from the
/// single-flight registry.
pub struct AppState {
    pub config: CardConfig,
    pub provider: Arc<dyn WeatherProvider>,
    pub icons: Arc<dyn IconSource>,
    pub fonts: Fonts,
    pub cache: CardCache,
    pub flights: SingleFlight<CardResult<RenderedCard>>,
}

impl AppState {
    /// Wire up the HTTP-backed provider and icon source.
    pub fn new(config: CardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        if config.api_key.is_none() {
            info!("API_KEY not set; requests must pass ?api_key=");
        }

        let provider = Arc::new(OpenWeatherMapProvider::new(
            client.clone(),
            config.weather_api_url.clone(),
            config.api_key.clone(),
        ));
        let icons = Arc::new(HttpIconSource::new(client, config.icon_base_url.clone()));
        let fonts = Fonts::load_dir(&config.assets_dir);

        Ok(Self::with_parts(
            config,
            provider,
            icons,
            fonts,
            Arc::new(SystemClock),
        ))
    }

    pub fn with_parts(
        config: CardConfig,
        provider: Arc<dyn WeatherProvider>,
        icons: Arc<dyn IconSource>,
        fonts: Fonts,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = CardCache::new(config.cache_dir.clone(), config.cache_ttl, clock);
        Self {
            config,
            provider,
            icons,
            fonts,
            cache,
            flights: SingleFlight::new(),
        }
    }
}
