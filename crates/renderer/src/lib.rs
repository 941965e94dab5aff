//! Raster rendering for weather cards.
//!
//! - Fixed layouts for mobile and desktop cards
//! - Rounded panels, icon tiles and text primitives on tiny-skia pixmaps
//! - Error card fallback
//! - PNG encoding

pub mod card;
pub mod error_card;
pub mod geometry;
pub mod icons;
pub mod layout;
pub mod palette;
pub mod png;
pub mod text;

pub use card::{compose_weather_card, CardCanvas, WeatherCard};
pub use error_card::{render_error_card, NO_DATA_NOTICE};
pub use geometry::{draw_rounded_rect, CornerRadii, Point, RadiusSpec, Rect, RectStyle};
pub use icons::{decode_icon, draw_pin, IconTile, TileStyle, CURRENT_TILE, FORECAST_TILE};
pub use layout::{compute_layout, LayoutSpec};
pub use png::{encode_pixmap, png_dimensions};
pub use text::{draw_text, FontSpec, Fonts, TextAlign, TextStyle, BOLD_FONT_FILE, REGULAR_FONT_FILE};
