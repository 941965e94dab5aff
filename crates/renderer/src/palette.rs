//! Card colours.

use tiny_skia::Color;

/// Straight-alpha RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Hero / primary panel.
pub const PRIMARY: Colour = Colour::rgb(81, 81, 229);
/// Stroke around the current-conditions icon tile.
pub const SECONDARY: Colour = Colour::rgb(114, 237, 242);
/// Detail pane background.
pub const DARK: Colour = Colour::rgb(34, 40, 49);
/// Forecast icon backing tile.
pub const GREY: Colour = Colour::rgb(238, 238, 238);
pub const BLACK: Colour = Colour::rgb(0, 0, 0);
pub const WHITE: Colour = Colour::rgb(255, 255, 255);
/// Translucent forecast cell overlay.
pub const CELL_OVERLAY: Colour = Colour::rgba(255, 255, 255, 26);
