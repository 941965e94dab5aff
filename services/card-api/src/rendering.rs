//! Render orchestration: cache, single-flight, provider, composition and
//! the error-card fallback.
//!
//! ```text
//! CacheCheck ─hit──────────────────────────────────────────────► Serve
//!     └─miss─► FetchCurrent ─► FetchForecast ─► Layout ─► Icons(join)
//!                   │               │                        │
//!                   └───────────────┴──────► ErrorCard ◄─────┘
//!              ... ─► Compose ─► Encode ─► Persist ─► Serve
//! ```

use std::time::Instant;

use bytes::Bytes;
use chrono::Local;
use tracing::{info, instrument, warn};

use card_common::{CardResult, DeviceClass, RenderRequest};
use renderer::{
    compose_weather_card, compute_layout, encode_pixmap, render_error_card, Fonts, TileStyle,
    WeatherCard, CURRENT_TILE, FORECAST_TILE,
};
use storage::CacheKey;

use crate::icons::{load_forecast_tiles, load_tile};
use crate::metrics;
use crate::state::AppState;

/// Where a served card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSource {
    Cache,
    Fresh,
    ErrorCard,
}

impl CardSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSource::Cache => "cache",
            CardSource::Fresh => "fresh",
            CardSource::ErrorCard => "error",
        }
    }
}

/// Encoded PNG ready to send.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub png: Bytes,
    pub source: CardSource,
}

/// Serve a card for `request`.
///
/// Only fails when even the error card cannot be encoded.
#[instrument(
    skip(state, request),
    fields(city = %request.location, country = %request.country_code, device = %request.device_class)
)]
pub async fn serve_card(state: &AppState, request: &RenderRequest) -> CardResult<RenderedCard> {
    let key = CacheKey::for_request(request);

    if let Some(png) = state.cache.lookup(&key).await {
        metrics::record_cache_lookup(true);
        return Ok(finish(RenderedCard {
            png,
            source: CardSource::Cache,
        }));
    }
    metrics::record_cache_lookup(false);

    let flight_key = key.to_string();
    let card = state
        .flights
        .run(&flight_key, || render_or_fallback(state, request, &key))
        .await?;
    Ok(finish(card))
}

fn finish(card: RenderedCard) -> RenderedCard {
    info!(source = card.source.as_str(), bytes = card.png.len(), "Serving card");
    metrics::record_outcome(card.source);
    card
}

/// Runs as the single-flight leader for `key`.
async fn render_or_fallback(
    state: &AppState,
    request: &RenderRequest,
    key: &CacheKey,
) -> CardResult<RenderedCard> {
    // A previous leader may have written the card since our lookup.
    if let Some(png) = state.cache.lookup(key).await {
        return Ok(RenderedCard {
            png,
            source: CardSource::Cache,
        });
    }

    let started = Instant::now();
    match render_weather_card(state, request).await {
        Ok(png) => {
            metrics::record_render_time(started.elapsed().as_secs_f64());
            if let Err(e) = state.cache.write(key, &png).await {
                warn!(key = %key, error = %e, "Failed to persist card, serving from memory");
                metrics::record_cache_write_failure();
            }
            Ok(RenderedCard {
                png: Bytes::from(png),
                source: CardSource::Fresh,
            })
        }
        Err(err) => {
            if err.is_not_found() {
                info!(key = %key, reason = err.card_message(), "Location not found");
            } else {
                warn!(key = %key, kind = err.kind(), error = %err, "Card render failed");
            }
            metrics::record_failure(err.kind());
            let png = error_card_png(&state.fonts, request.device_class, Some(err.card_message()))?;
            Ok(RenderedCard {
                png,
                source: CardSource::ErrorCard,
            })
        }
    }
}

/// Fetch, compose and encode a weather card. Nothing is written to disk.
pub async fn render_weather_card(state: &AppState, request: &RenderRequest) -> CardResult<Vec<u8>> {
    let api_key = request.api_key_override.as_deref();
    let snapshot = state
        .provider
        .current(&request.location, &request.country_code, api_key)
        .await?;
    let forecast = state
        .provider
        .forecast(snapshot.latitude, snapshot.longitude, api_key)
        .await?;
    let days = forecast.strip_days()?;

    let layout = compute_layout(request.device_class);
    let strip = layout.forecast;
    let primary = layout.primary;

    let mut current_style = TileStyle {
        radius: primary.icon_radius,
        ..CURRENT_TILE
    };
    if !primary.icon_outlined {
        current_style = current_style.without_outline();
    }
    let forecast_style = TileStyle {
        radius: strip.icon_radius,
        ..FORECAST_TILE
    };

    let (current_tile, forecast_tiles) = futures::try_join!(
        load_tile(
            state.icons.as_ref(),
            &snapshot.condition_icon_id,
            primary.icon_tile.width as u32,
            current_style,
        ),
        load_forecast_tiles(
            state.icons.as_ref(),
            days,
            strip.icon_size as u32,
            forecast_style,
        ),
    )?;

    let card = WeatherCard {
        snapshot: &snapshot,
        forecast: days,
        current_tile: Some(&current_tile),
        forecast_tiles: &forecast_tiles,
        today: Local::now().date_naive(),
        timezone: &Local,
    };
    let pixmap = compose_weather_card(layout, &state.fonts, &card)?;
    encode_pixmap(&pixmap)
}

/// Encode the error card for `device`.
pub fn error_card_png(fonts: &Fonts, device: DeviceClass, message: Option<&str>) -> CardResult<Bytes> {
    let pixmap = render_error_card(fonts, device, message, Local::now().date_naive());
    encode_pixmap(&pixmap).map(Bytes::from)
}
