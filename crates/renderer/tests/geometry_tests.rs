//! Pixel-level checks for the rounded rectangle primitive.

use renderer::palette::{BLACK, PRIMARY, WHITE};
use renderer::{draw_rounded_rect, CornerRadii, RadiusSpec, Rect, RectStyle};
use tiny_skia::Pixmap;

fn rgba_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let px = pixmap.pixel(x, y).unwrap().demultiply();
    (px.red(), px.green(), px.blue(), px.alpha())
}

#[test]
fn test_fill_covers_interior() {
    let mut pixmap = Pixmap::new(100, 100).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(10.0, 10.0, 80.0, 80.0),
        10.0,
        &RectStyle::fill(PRIMARY),
    );
    assert_eq!(rgba_at(&pixmap, 50, 50), (PRIMARY.r, PRIMARY.g, PRIMARY.b, 255));
    assert_eq!(rgba_at(&pixmap, 5, 5).3, 0);
}

#[test]
fn test_rounded_corner_stays_clear() {
    let mut pixmap = Pixmap::new(100, 100).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(0.0, 0.0, 100.0, 100.0),
        30.0,
        &RectStyle::fill(WHITE),
    );
    assert_eq!(rgba_at(&pixmap, 1, 1).3, 0);
    assert_eq!(rgba_at(&pixmap, 98, 98).3, 0);
    assert_eq!(rgba_at(&pixmap, 50, 1).3, 255);
}

#[test]
fn test_square_corners_are_filled() {
    let mut pixmap = Pixmap::new(40, 40).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(0.0, 0.0, 40.0, 40.0),
        CornerRadii::corners(0.0, 0.0, 15.0, 15.0),
        &RectStyle::fill(WHITE),
    );
    // Top corners are square, bottom ones rounded.
    assert_eq!(rgba_at(&pixmap, 0, 0).3, 255);
    assert_eq!(rgba_at(&pixmap, 39, 0).3, 255);
    assert_eq!(rgba_at(&pixmap, 0, 39).3, 0);
}

#[test]
fn test_stroke_only_leaves_interior_clear() {
    let mut pixmap = Pixmap::new(60, 60).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(10.0, 10.0, 40.0, 40.0),
        5.0,
        &RectStyle::stroke(BLACK),
    );
    assert_eq!(rgba_at(&pixmap, 30, 30).3, 0);
    assert!(rgba_at(&pixmap, 30, 10).3 > 0);
}

#[test]
fn test_invalid_radius_draws_square() {
    let mut pixmap = Pixmap::new(20, 20).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(0.0, 0.0, 20.0, 20.0),
        RadiusSpec::Invalid,
        &RectStyle::fill(WHITE),
    );
    assert_eq!(rgba_at(&pixmap, 0, 0).3, 255);
}

#[test]
fn test_oversized_radius_is_fitted() {
    let mut pixmap = Pixmap::new(40, 20).unwrap();
    draw_rounded_rect(
        &mut pixmap,
        Rect::new(0.0, 0.0, 40.0, 20.0),
        500.0,
        &RectStyle::fill(WHITE),
    );
    // Pill shape: middle is solid, extreme corners clear.
    assert_eq!(rgba_at(&pixmap, 20, 10).3, 255);
    assert_eq!(rgba_at(&pixmap, 0, 0).3, 0);
}
