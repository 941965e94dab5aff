//! Error types for the weather-card services.

use thiserror::Error;

/// Result type alias using CardError.
pub type CardResult<T> = Result<T, CardError>;

/// Message shown on the error card when no city was requested.
pub const UNKNOWN_CITY_MESSAGE: &str = "Unknown city";

/// Message shown on the error card for failures whose detail must stay private.
pub const GENERIC_FAILURE_MESSAGE: &str = "Weather data unavailable";

/// Primary error type for card rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    // === Provider Errors ===
    /// The provider reported that the location does not exist.
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),

    // === Rendering Errors ===
    #[error("Icon decode failed: {0}")]
    IconDecode(String),

    #[error("Font asset error: {0}")]
    Asset(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Storage Errors ===
    #[error("Cache error: {0}")]
    Cache(String),
}

impl CardError {
    /// Text to print on the error card for this failure.
    ///
    /// Only the provider's own not-found message is shown verbatim; every other
    /// failure is reduced to a generic message.
    pub fn card_message(&self) -> &str {
        match self {
            CardError::NotFound(message) if !message.trim().is_empty() => message,
            CardError::NotFound(_) => UNKNOWN_CITY_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether this is the provider's typed "not found" miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CardError::NotFound(_))
    }

    /// Short label used for log fields and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            CardError::NotFound(_) => "not_found",
            CardError::Upstream(_) => "upstream",
            CardError::MalformedForecast(_) => "malformed_forecast",
            CardError::IconDecode(_) => "icon_decode",
            CardError::Asset(_) => "asset",
            CardError::Render(_) => "render",
            CardError::Encode(_) => "encode",
            CardError::Cache(_) => "cache",
        }
    }
}

impl From<serde_json::Error> for CardError {
    fn from(err: serde_json::Error) -> Self {
        CardError::Upstream(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_shown() {
        let err = CardError::NotFound("city not found".to_string());
        assert_eq!(err.card_message(), "city not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_not_found_message_falls_back() {
        let err = CardError::NotFound("  ".to_string());
        assert_eq!(err.card_message(), UNKNOWN_CITY_MESSAGE);
    }

    #[test]
    fn test_upstream_detail_is_hidden() {
        let err = CardError::Upstream("connection reset by 10.0.0.3".to_string());
        assert_eq!(err.card_message(), GENERIC_FAILURE_MESSAGE);
        assert!(!err.is_not_found());
        assert_eq!(err.kind(), "upstream");
    }
}
