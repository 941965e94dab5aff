//! Wind direction helpers.

/// Sixteen compass points, starting just past due north.
const DIRECTIONS: [&str; 16] = [
    "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW",
    "N",
];

/// Width of one compass sector in degrees.
const SECTOR_DEGREES: f64 = 22.5;

/// Half a sector; everything up to this is due north.
const NORTH_CUTOFF: f64 = 11.25;

/// Convert a wind bearing in degrees to a 16-point compass label.
///
/// Bearings at or below 11.25 are `N`; above that each 22.5 degree sector
/// maps to the next point. NaN and out-of-range values are `N`.
pub fn compass_direction(degrees: f64) -> &'static str {
    if degrees.is_nan() || degrees <= NORTH_CUTOFF {
        return "N";
    }
    let index = ((degrees - NORTH_CUTOFF) / SECTOR_DEGREES).trunc();
    if !index.is_finite() {
        return "N";
    }
    DIRECTIONS.get(index as usize).copied().unwrap_or("N")
}

/// Parse a bearing from text; unparsable input is `N`.
pub fn compass_direction_from_str(raw: &str) -> &'static str {
    raw.trim()
        .parse::<f64>()
        .map(compass_direction)
        .unwrap_or("N")
}

/// Bearing from a loosely typed JSON value (number or numeric string).
pub fn compass_direction_from_value(value: Option<&serde_json::Value>) -> &'static str {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(compass_direction).unwrap_or("N"),
        Some(serde_json::Value::String(s)) => compass_direction_from_str(s),
        _ => "N",
    }
}
