//! Weather icon fetching and the forecast-strip fan-out.

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::try_join_all;
use reqwest::Client;
use tracing::debug;

use card_common::{CardError, CardResult, ForecastDay};
use renderer::{IconTile, TileStyle};

/// Source of encoded icon images keyed by provider icon id (e.g. `04d`).
#[async_trait]
pub trait IconSource: Send + Sync {
    async fn fetch(&self, icon_id: &str) -> CardResult<Bytes>;
}

/// Fetches `{base}/{icon}@2x.png` over HTTP.
pub struct HttpIconSource {
    client: Client,
    base_url: String,
}

impl HttpIconSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn icon_url(&self, icon_id: &str) -> String {
        format!("{}/{}@2x.png", self.base_url, icon_id)
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch(&self, icon_id: &str) -> CardResult<Bytes> {
        if icon_id.is_empty() || !icon_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CardError::Upstream(format!("invalid icon id {:?}", icon_id)));
        }

        let url = self.icon_url(icon_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CardError::Upstream(format!("icon {} fetch failed: {}", icon_id, e)))?;

        response
            .bytes()
            .await
            .map_err(|e| CardError::Upstream(format!("icon {} read failed: {}", icon_id, e)))
    }
}

/// Fetch one icon and paint it onto its own tile.
pub async fn load_tile(
    source: &dyn IconSource,
    icon_id: &str,
    size: u32,
    style: TileStyle,
) -> CardResult<IconTile> {
    let bytes = source.fetch(icon_id).await?;
    let tile = IconTile::paint(&bytes, size, &style)?;
    debug!(icon_id, size, "Icon tile ready");
    Ok(tile)
}

/// Load one tile per forecast day, concurrently.
///
/// Tiles come back in the order of `days`, whatever order the fetches
/// finish in. The first failure fails the whole strip.
pub async fn load_forecast_tiles(
    source: &dyn IconSource,
    days: &[ForecastDay],
    size: u32,
    style: TileStyle,
) -> CardResult<Vec<IconTile>> {
    try_join_all(
        days.iter()
            .map(|day| load_tile(source, &day.condition_icon_id, size, style)),
    )
    .await
}
