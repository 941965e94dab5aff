//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use card_common::{DeviceClass, RenderRequest, UNKNOWN_CITY_MESSAGE};

use crate::metrics;
use crate::rendering::{error_card_png, serve_card, CardSource, RenderedCard};
use crate::state::AppState;

/// Response header naming where the card came from.
pub const CARD_SOURCE_HEADER: &str = "x-card-source";

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub api_key: Option<String>,
}

/// Card routes, health check and favicon. `/metrics` is added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/health", get(health_handler))
        .route("/:city", get(city_handler))
        .route("/:city/:country", get(city_country_handler))
        .route("/:city/:country/*rest", get(city_country_rest_handler))
        .layer(Extension(state))
}

fn device_class(headers: &HeaderMap) -> DeviceClass {
    DeviceClass::from_user_agent(
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    )
}

fn png_response(card: RenderedCard) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                header::HeaderName::from_static(CARD_SOURCE_HEADER),
                HeaderValue::from_static(card.source.as_str()),
            ),
        ],
        card.png,
    )
        .into_response()
}

async fn respond(state: &AppState, request: RenderRequest) -> Response {
    match serve_card(state, &request).await {
        Ok(card) => png_response(card),
        Err(e) => {
            error!(error = %e, "Failed to encode error card");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn city_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(city): Path<String>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    metrics::record_request("city");
    let request = RenderRequest::new(
        city,
        None,
        device_class(&headers),
        query.api_key,
        &state.config.default_country,
    );
    respond(&state, request).await
}

pub async fn city_country_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((city, country)): Path<(String, String)>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    city_country(&state, city, country, query, &headers).await
}

/// Segments after the country are ignored.
pub async fn city_country_rest_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((city, country, _rest)): Path<(String, String, String)>,
    Query(query): Query<CardQuery>,
    headers: HeaderMap,
) -> Response {
    city_country(&state, city, country, query, &headers).await
}

async fn city_country(
    state: &AppState,
    city: String,
    country: String,
    query: CardQuery,
    headers: &HeaderMap,
) -> Response {
    metrics::record_request("city_country");
    let request = RenderRequest::new(
        city,
        Some(country.as_str()),
        device_class(headers),
        query.api_key,
        &state.config.default_country,
    );
    respond(state, request).await
}

/// No city given: always the "Unknown city" error card.
pub async fn root_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    metrics::record_request("root");
    match error_card_png(&state.fonts, device_class(&headers), Some(UNKNOWN_CITY_MESSAGE)) {
        Ok(png) => png_response(RenderedCard {
            png,
            source: CardSource::ErrorCard,
        }),
        Err(e) => {
            error!(error = %e, "Failed to encode error card");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
