//! Weather icon tiles and the location pin.
//!
//! Each icon tile is painted on its own private pixmap (backing rounded rect
//! plus the scaled icon) and only later composited into its slot on the card.
//! Tiles for different forecast days can therefore be prepared concurrently
//! without sharing any drawing state.

use image::imageops::FilterType;
use tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};

use card_common::{CardError, CardResult};

use crate::geometry::{draw_rounded_rect, Rect, RectStyle};
use crate::palette::{BLACK, GREY, PRIMARY, SECONDARY};

/// Embedded location pin drawn next to the city name.
const PIN_SVG: &str = include_str!("../assets/pin.svg");

/// Transparent border around a tile so the stroke is not clipped.
const TILE_MARGIN: u32 = 1;

/// Backing style for an icon tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub radius: f32,
    pub rect: RectStyle,
}

impl TileStyle {
    /// Same tile with the fill only.
    pub fn without_outline(mut self) -> Self {
        self.rect.stroke = None;
        self
    }
}

/// Grey tile with a black outline, used in the forecast strip.
pub const FORECAST_TILE: TileStyle = TileStyle {
    radius: 8.0,
    rect: RectStyle::fill_and_stroke(GREY, BLACK),
};

/// Primary-coloured tile with a light outline, used for current conditions.
pub const CURRENT_TILE: TileStyle = TileStyle {
    radius: 10.0,
    rect: RectStyle::fill_and_stroke(PRIMARY, SECONDARY),
};

/// Decode an encoded icon (PNG, JPEG, ..) and scale it to `size` x `size`.
pub fn decode_icon(bytes: &[u8], size: u32) -> CardResult<Pixmap> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CardError::IconDecode(e.to_string()))?;
    let rgba = decoded.resize_exact(size, size, FilterType::Triangle).to_rgba8();

    let mut pixmap = Pixmap::new(size, size)
        .ok_or_else(|| CardError::IconDecode(format!("invalid icon size {}", size)))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// A fully painted icon tile awaiting placement.
#[derive(Debug, Clone)]
pub struct IconTile {
    pixmap: Pixmap,
    size: u32,
}

impl IconTile {
    /// Decode `icon_bytes` and paint it over a rounded backing tile.
    pub fn paint(icon_bytes: &[u8], size: u32, style: &TileStyle) -> CardResult<Self> {
        let icon = decode_icon(icon_bytes, size)?;
        Self::from_icon(&icon, style)
    }

    pub fn from_icon(icon: &Pixmap, style: &TileStyle) -> CardResult<Self> {
        let size = icon.width().max(icon.height());
        let side = size + TILE_MARGIN * 2;
        let mut pixmap = Pixmap::new(side, side)
            .ok_or_else(|| CardError::Render(format!("invalid tile size {}", side)))?;

        let m = TILE_MARGIN as f32;
        draw_rounded_rect(
            &mut pixmap,
            Rect::new(m, m, size as f32, size as f32),
            style.radius,
            &style.rect,
        );
        pixmap.draw_pixmap(
            TILE_MARGIN as i32,
            TILE_MARGIN as i32,
            icon.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        Ok(Self { pixmap, size })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Composite the tile so its inner square lands on `slot`'s top-left.
    pub fn place(&self, canvas: &mut Pixmap, slot: Rect) {
        let m = TILE_MARGIN as i32;
        canvas.draw_pixmap(
            slot.x.round() as i32 - m,
            slot.y.round() as i32 - m,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

/// Draw the location pin scaled into `rect`.
pub fn draw_pin(canvas: &mut Pixmap, rect: Rect) {
    let tree = match usvg::Tree::from_str(PIN_SVG, &usvg::Options::default()) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse pin icon");
            return;
        }
    };

    let svg_size = tree.size();
    let sx = rect.width / svg_size.width();
    let sy = rect.height / svg_size.height();
    let transform = Transform::from_scale(sx, sy).post_translate(rect.x, rect.y);
    resvg::render(&tree, transform, &mut canvas.as_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_decode_scales_to_size() {
        let icon = decode_icon(&png_bytes(100, 100, [255, 0, 0, 255]), 50).unwrap();
        assert_eq!((icon.width(), icon.height()), (50, 50));
        let px = icon.pixel(25, 25).unwrap();
        assert_eq!((px.red(), px.alpha()), (255, 255));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode_icon(b"<html>not an image</html>", 50).unwrap_err();
        assert!(matches!(err, CardError::IconDecode(_)));
    }

    #[test]
    fn test_tile_places_inside_slot() {
        let tile = IconTile::paint(&png_bytes(10, 10, [0, 0, 255, 255]), 50, &FORECAST_TILE).unwrap();
        assert_eq!(tile.size(), 50);

        let mut canvas = Pixmap::new(200, 200).unwrap();
        tile.place(&mut canvas, Rect::new(100.0, 100.0, 50.0, 50.0));

        let inside = canvas.pixel(125, 125).unwrap();
        assert_eq!((inside.blue(), inside.alpha()), (255, 255));
        // Outside the slot (and its 1px stroke margin) stays untouched.
        assert_eq!(canvas.pixel(50, 50).unwrap().alpha(), 0);
        assert_eq!(canvas.pixel(160, 125).unwrap().alpha(), 0);
    }

    #[test]
    fn test_transparent_icon_shows_backing_tile() {
        let tile = IconTile::paint(&png_bytes(8, 8, [0, 0, 0, 0]), 50, &FORECAST_TILE).unwrap();
        let mut canvas = Pixmap::new(60, 60).unwrap();
        tile.place(&mut canvas, Rect::new(5.0, 5.0, 50.0, 50.0));
        let px = canvas.pixel(30, 30).unwrap();
        assert_eq!((px.red(), px.green(), px.blue()), (GREY.r, GREY.g, GREY.b));
    }

    #[test]
    fn test_outline_only_touches_tile_edge() {
        let icon = png_bytes(8, 8, [0, 0, 0, 0]);
        let edge = |style: &TileStyle| {
            let tile = IconTile::paint(&icon, 50, style).unwrap();
            let mut canvas = Pixmap::new(60, 60).unwrap();
            tile.place(&mut canvas, Rect::new(5.0, 5.0, 50.0, 50.0));
            (canvas.pixel(5, 30).unwrap(), canvas.pixel(30, 30).unwrap())
        };

        let (outlined_edge, outlined_centre) = edge(&FORECAST_TILE);
        let (plain_edge, plain_centre) = edge(&FORECAST_TILE.without_outline());
        assert!(outlined_edge.red() < GREY.r);
        assert_eq!((plain_edge.red(), plain_edge.alpha()), (GREY.r, 255));
        assert_eq!(outlined_centre, plain_centre);
    }

    #[test]
    fn test_pin_draws_inside_rect() {
        let mut canvas = Pixmap::new(40, 40).unwrap();
        draw_pin(&mut canvas, Rect::new(10.0, 10.0, 13.0, 13.0));
        let drawn = canvas.pixels().iter().filter(|p| p.alpha() > 0).count();
        assert!(drawn > 0);
        assert_eq!(canvas.pixel(2, 2).unwrap().alpha(), 0);
        assert_eq!(canvas.pixel(35, 35).unwrap().alpha(), 0);
    }
}
