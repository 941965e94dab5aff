//! Viewer device classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-agent fragments that mark a mobile viewer.
const MOBILE_UA_TOKENS: &[&str] = &[
    "mobi",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "windows phone",
    "blackberry",
    "bb10",
    "opera mini",
    "iemobile",
    "silk/",
    "kindle",
];

/// The two supported viewport layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Stacked 320x640 card.
    Mobile,
    /// Two-pane 640x408 card.
    Desktop,
}

impl DeviceClass {
    /// Classify a viewer from its `User-Agent` header. Missing headers are desktop.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent else {
            return DeviceClass::Desktop;
        };
        let ua = ua.to_ascii_lowercase();
        if MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Suffix used in cache file names.
    pub fn cache_suffix(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mob",
            DeviceClass::Desktop => "desk",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Mobile => write!(f, "mobile"),
            DeviceClass::Desktop => write!(f, "desktop"),
        }
    }
}
