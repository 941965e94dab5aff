//! Text placement on the card canvas.
//!
//! Text is anchored at an exact baseline position: left-aligned text starts
//! at the anchor, centred text is centred on it and right-aligned text ends on
//! it. Glyphs are rasterized with rusttype and blended source-over into the
//! pixmap, so output is deterministic for a given font file.

use std::path::Path;

use rusttype::{point, Font, Scale};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::geometry::Point;
use crate::palette::{Colour, WHITE};

/// File name of the regular face inside the assets directory.
pub const REGULAR_FONT_FILE: &str = "Montserrat-Regular.ttf";
/// File name of the bold face inside the assets directory.
pub const BOLD_FONT_FILE: &str = "Montserrat-Bold.ttf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Face and pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size: f32,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::regular(16.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything that controls how a string is drawn. Defaults to 16px regular,
/// left-aligned, white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub align: TextAlign,
    pub colour: Colour,
}

impl TextStyle {
    pub const fn new(font: FontSpec) -> Self {
        Self {
            font,
            align: TextAlign::Left,
            colour: WHITE,
        }
    }

    pub const fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(FontSpec::default())
    }
}

/// Horizontal span covered by a drawn string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub left: f32,
    pub width: f32,
}

impl TextExtent {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Faces compiled into the renderer, used when the assets directory has none.
const BUNDLED_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Font faces loaded once at process start.
///
/// A missing face is tolerated: text in that weight falls back to the other
/// face, and when neither is present text drawing is skipped.
#[derive(Default)]
pub struct Fonts {
    regular: Option<Font<'static>>,
    bold: Option<Font<'static>>,
}

impl std::fmt::Debug for Fonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonts")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl Fonts {
    /// No faces; every text call is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The DejaVu Sans faces shipped in `assets/fonts`.
    pub fn bundled() -> Self {
        Self {
            regular: bundled_face(FontWeight::Regular),
            bold: bundled_face(FontWeight::Bold),
        }
    }

    /// Load the regular and bold faces from `dir`.
    ///
    /// A face that is absent or unreadable in `dir` is replaced by the
    /// bundled face of the same weight.
    pub fn load_dir(dir: &Path) -> Self {
        let load = |file: &str, weight: FontWeight| -> Option<Font<'static>> {
            let path = dir.join(file);
            match std::fs::read(&path) {
                Ok(data) => match Font::try_from_vec(data) {
                    Some(font) => return Some(font),
                    None => {
                        tracing::warn!(path = %path.display(), "Font file could not be parsed, using bundled face");
                    }
                },
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::info!(path = %path.display(), "Font file not found, using bundled face");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Font file not readable, using bundled face");
                }
            }
            bundled_face(weight)
        };

        let fonts = Self {
            regular: load(REGULAR_FONT_FILE, FontWeight::Regular),
            bold: load(BOLD_FONT_FILE, FontWeight::Bold),
        };
        tracing::info!(dir = %dir.display(), fonts = ?fonts, "Loaded card fonts");
        fonts
    }

    pub fn has_faces(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }

    fn face(&self, weight: FontWeight) -> Option<&Font<'static>> {
        match weight {
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    /// Advance width of `text` in pixels, or `None` without a usable face.
    pub fn measure(&self, text: &str, font: FontSpec) -> Option<f32> {
        self.face(font.weight)
            .map(|face| advance_width(face, text, Scale::uniform(font.size)))
    }
}

fn bundled_face(weight: FontWeight) -> Option<Font<'static>> {
    let data = match weight {
        FontWeight::Regular => BUNDLED_REGULAR,
        FontWeight::Bold => BUNDLED_BOLD,
    };
    let face = Font::try_from_bytes(data);
    if face.is_none() {
        tracing::warn!(?weight, "Failed to load bundled font");
    }
    face
}

fn advance_width(face: &Font<'static>, text: &str, scale: Scale) -> f32 {
    face.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Draw `text` with its baseline anchored at `anchor`.
///
/// Returns the horizontal span used, or `None` when no face is loaded.
pub fn draw_text(
    pixmap: &mut Pixmap,
    fonts: &Fonts,
    text: &str,
    anchor: Point,
    style: &TextStyle,
) -> Option<TextExtent> {
    let Some(face) = fonts.face(style.font.weight) else {
        tracing::debug!(text, "No font loaded, skipping text");
        return None;
    };

    let scale = Scale::uniform(style.font.size);
    let width = advance_width(face, text, scale);
    let left = match style.align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width / 2.0,
        TextAlign::Right => anchor.x - width,
    };

    for glyph in face.layout(text, scale, point(left, anchor.y)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            blend_coverage(
                pixmap,
                bb.min.x + gx as i32,
                bb.min.y + gy as i32,
                style.colour,
                coverage,
            );
        });
    }

    Some(TextExtent { left, width })
}

/// Source-over blend of a single glyph coverage sample.
fn blend_coverage(pixmap: &mut Pixmap, x: i32, y: i32, colour: Colour, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= pixmap.width() || y as u32 >= pixmap.height() {
        return;
    }
    let alpha = (colour.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let idx = (y as u32 * pixmap.width() + x as u32) as usize;
    let dst = pixmap.pixels()[idx];
    let inv = 1.0 - alpha;

    let a = (alpha * 255.0 + dst.alpha() as f32 * inv).round().clamp(0.0, 255.0) as u8;
    let channel = |src: u8, dst: u8| -> u8 {
        let v = (src as f32 * alpha + dst as f32 * inv).round().clamp(0.0, 255.0) as u8;
        v.min(a)
    };
    let r = channel(colour.r, dst.red());
    let g = channel(colour.g, dst.green());
    let b = channel(colour.b, dst.blue());

    if let Some(px) = PremultipliedColorU8::from_rgba(r, g, b, a) {
        pixmap.pixels_mut()[idx] = px;
    }
}
