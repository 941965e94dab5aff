//! Render requests.

use crate::device::DeviceClass;

/// A single request for a weather card.
///
/// The country falls back to a default resolved once at startup. Nothing in
/// request handling can change that default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// City name as the caller typed it.
    pub location: String,
    /// Country code sent to the provider.
    pub country_code: String,
    pub device_class: DeviceClass,
    /// Per-request provider key from the `api_key` query parameter.
    pub api_key_override: Option<String>,
}

impl RenderRequest {
    pub fn new(
        location: impl Into<String>,
        country_code: Option<&str>,
        device_class: DeviceClass,
        api_key_override: Option<String>,
        default_country: &str,
    ) -> Self {
        let country_code = country_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_country)
            .to_string();

        Self {
            location: location.into().trim().to_string(),
            country_code,
            device_class,
            api_key_override: api_key_override.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Lower-cased, filename-safe city.
    pub fn normalized_location(&self) -> String {
        normalize_component(&self.location)
    }

    /// Lower-cased, filename-safe country code.
    pub fn normalized_country(&self) -> String {
        normalize_component(&self.country_code)
    }
}

/// Lower-case a key component and restrict it to filename-safe characters.
///
/// Alphanumerics are kept, separators (space, `-`, `_`, `.`, `'`) become `_`,
/// everything else is dropped so a component can never escape the cache
/// directory.
pub fn normalize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_lowercase().collect::<String>())
            } else if matches!(c, ' ' | '-' | '_' | '.' | '\'') {
                Some("_".to_string())
            } else {
                None
            }
        })
        .collect()
}
