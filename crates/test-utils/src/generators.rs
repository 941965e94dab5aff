//! Generated images for icon tests.

use std::io::Cursor;

use image::{ImageOutputFormat, Rgba, RgbaImage};

/// Encodes a solid-colour PNG of the given size.
pub fn solid_icon_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
        .expect("Failed to encode test icon");
    out
}

/// A 100x100 icon like the provider's `@2x` images: opaque disc on clear.
pub fn sample_icon_png() -> Vec<u8> {
    let size = 100u32;
    let centre = size as f32 / 2.0;
    let img = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - centre;
        let dy = y as f32 + 0.5 - centre;
        if (dx * dx + dy * dy).sqrt() <= 30.0 {
            Rgba([255, 200, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
        .expect("Failed to encode test icon");
    out
}
