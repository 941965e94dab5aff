//! Rounded-rectangle primitives.
//!
//! Corner radii arrive either as a single number or as a per-corner set. Each
//! corner is normalized on its own: a partially specified set keeps the
//! corners it names and zeroes the rest.

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::palette::Colour;

/// A pixel position on the canvas. For text this is the baseline anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// True when the two rectangles share no interior pixels.
    pub fn is_disjoint(&self, other: &Rect) -> bool {
        self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y
    }
}

/// Radius as supplied by a caller, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusSpec {
    /// One radius for all four corners.
    Uniform(f32),
    /// Per-corner radii; missing corners are `None`.
    Corners {
        top_left: Option<f32>,
        top_right: Option<f32>,
        bottom_right: Option<f32>,
        bottom_left: Option<f32>,
    },
    /// Anything that is neither a number nor a corner set.
    Invalid,
}

impl RadiusSpec {
    /// Read a radius from loosely typed JSON.
    ///
    /// Numbers are uniform radii. Objects are corner sets keyed by `tl`/`tr`/
    /// `br`/`bl` (or `topLeft`.. / `top_left`..). Everything else is invalid.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(r) => RadiusSpec::Uniform(r as f32),
                None => RadiusSpec::Invalid,
            },
            serde_json::Value::Object(map) => {
                let corner = |keys: [&str; 3]| {
                    keys.iter()
                        .find_map(|k| map.get(*k))
                        .and_then(|v| v.as_f64())
                        .map(|r| r as f32)
                };
                RadiusSpec::Corners {
                    top_left: corner(["tl", "topLeft", "top_left"]),
                    top_right: corner(["tr", "topRight", "top_right"]),
                    bottom_right: corner(["br", "bottomRight", "bottom_right"]),
                    bottom_left: corner(["bl", "bottomLeft", "bottom_left"]),
                }
            }
            _ => RadiusSpec::Invalid,
        }
    }
}

impl From<f32> for RadiusSpec {
    fn from(radius: f32) -> Self {
        RadiusSpec::Uniform(radius)
    }
}

impl From<CornerRadii> for RadiusSpec {
    fn from(radii: CornerRadii) -> Self {
        RadiusSpec::Corners {
            top_left: Some(radii.top_left),
            top_right: Some(radii.top_right),
            bottom_right: Some(radii.bottom_right),
            bottom_left: Some(radii.bottom_left),
        }
    }
}

/// Normalized per-corner radii. Every value is finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii::uniform(0.0);

    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub const fn corners(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub fn normalize(spec: impl Into<RadiusSpec>) -> Self {
        match spec.into() {
            RadiusSpec::Uniform(r) => Self::uniform(positive_or_zero(Some(r))),
            RadiusSpec::Corners {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => Self {
                top_left: positive_or_zero(top_left),
                top_right: positive_or_zero(top_right),
                bottom_right: positive_or_zero(bottom_right),
                bottom_left: positive_or_zero(bottom_left),
            },
            RadiusSpec::Invalid => Self::ZERO,
        }
    }

    /// Clamp each radius so it fits inside a `width` x `height` box.
    fn fitted(self, width: f32, height: f32) -> Self {
        let limit = (width.min(height) / 2.0).max(0.0);
        Self {
            top_left: self.top_left.min(limit),
            top_right: self.top_right.min(limit),
            bottom_right: self.bottom_right.min(limit),
            bottom_left: self.bottom_left.min(limit),
        }
    }
}

fn positive_or_zero(value: Option<f32>) -> f32 {
    match value {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => 0.0,
    }
}

/// How a rounded rectangle is painted. Fill is composited beneath stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Colour>,
    pub stroke: Option<Colour>,
    pub stroke_width: f32,
}

impl RectStyle {
    pub const fn fill(colour: Colour) -> Self {
        Self {
            fill: Some(colour),
            stroke: None,
            stroke_width: 1.0,
        }
    }

    pub const fn stroke(colour: Colour) -> Self {
        Self {
            fill: None,
            stroke: Some(colour),
            stroke_width: 1.0,
        }
    }

    pub const fn fill_and_stroke(fill: Colour, stroke: Colour) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            stroke_width: 1.0,
        }
    }
}

/// Build a closed rounded-rectangle path: four straight edges joined by
/// quadratic corners. Returns `None` for empty rectangles.
pub fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }

    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let r = radii.fitted(w, h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r.top_left, y);
    pb.line_to(x + w - r.top_right, y);
    pb.quad_to(x + w, y, x + w, y + r.top_right);
    pb.line_to(x + w, y + h - r.bottom_right);
    pb.quad_to(x + w, y + h, x + w - r.bottom_right, y + h);
    pb.line_to(x + r.bottom_left, y + h);
    pb.quad_to(x, y + h, x, y + h - r.bottom_left);
    pb.line_to(x, y + r.top_left);
    pb.quad_to(x, y, x + r.top_left, y);
    pb.close();
    pb.finish()
}

/// Paint a rounded rectangle onto `pixmap`.
pub fn draw_rounded_rect(
    pixmap: &mut Pixmap,
    rect: Rect,
    radius: impl Into<RadiusSpec>,
    style: &RectStyle,
) {
    let radii = CornerRadii::normalize(radius);
    let Some(path) = rounded_rect_path(rect, radii) else {
        tracing::debug!(?rect, "Skipping empty rounded rect");
        return;
    };

    if let Some(fill) = style.fill {
        let paint = solid_paint(fill);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    if let Some(stroke_colour) = style.stroke {
        let paint = solid_paint(stroke_colour);
        let stroke = Stroke {
            width: style.stroke_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn solid_paint(colour: Colour) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(colour.to_color());
    paint.anti_alias = true;
    paint
}
