//! Device-aware card layout.
//!
//! `compute_layout` is a pure function of the device class. Every drawn
//! element takes its absolute position from the returned `LayoutSpec`.

use card_common::{DeviceClass, FORECAST_STRIP_LEN};

use crate::geometry::{CornerRadii, Point, Rect};
use crate::palette::{Colour, DARK, PRIMARY};

/// Width of one forecast cell in pixels.
pub const FORECAST_CELL_WIDTH: f32 = 70.0;

/// Corner radius of the background panes.
const PANE_RADIUS: f32 = 25.0;

const MOBILE_WIDTH: u32 = 320;
const MOBILE_HEIGHT: u32 = 640;
const DESKTOP_WIDTH: u32 = 640;
const DESKTOP_HEIGHT: u32 = 408;

/// A filled background panel, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pane {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub colour: Colour,
}

/// Weekday, date and location lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    pub weekday: Point,
    pub date: Point,
    pub location: Point,
    /// Location pin drawn left of the location line.
    pub pin: Rect,
}

/// Current icon tile, temperature and condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryLayout {
    pub icon_tile: Rect,
    pub icon_radius: f32,
    /// Whether the icon tile gets an outline as well as its fill.
    pub icon_outlined: bool,
    pub temperature: Point,
    pub condition: Point,
}

/// Fields that can appear in the detail column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    FeelsLike,
    Pressure,
    Humidity,
    Wind,
    WindDirection,
}

impl DetailField {
    pub fn label(&self) -> &'static str {
        match self {
            DetailField::FeelsLike => "FEELS LIKE",
            DetailField::Pressure => "PRESSURE",
            DetailField::Humidity => "HUMIDITY",
            DetailField::Wind => "WIND",
            DetailField::WindDirection => "WIND DIRECTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailRow {
    pub field: DetailField,
    pub baseline: f32,
}

/// Label/value rows. Labels start at `label_left`, values end at `value_right`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailLayout {
    pub label_left: f32,
    pub value_right: f32,
    pub rows: Vec<DetailRow>,
}

/// The four-cell forecast strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStripLayout {
    /// Left edge of cell 1.
    pub origin_left: f32,
    pub cell_width: f32,
    pub cell_top: f32,
    pub cell_height: f32,
    pub cell_radius: f32,
    /// Offset of the icon slot from the cell's top-left corner.
    pub icon_inset: f32,
    pub icon_size: f32,
    pub icon_radius: f32,
    pub day_baseline: f32,
    pub temperature_baseline: f32,
    pub condition_baseline: f32,
}

impl ForecastStripLayout {
    /// Left edge of cell `index` (1-based, 1..=4).
    pub fn cell_left(&self, index: usize) -> f32 {
        self.origin_left + index.saturating_sub(1) as f32 * self.cell_width
    }

    pub fn cell_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.cell_left(index),
            self.cell_top,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Where the icon tile for cell `index` goes.
    pub fn icon_slot(&self, index: usize) -> Rect {
        Rect::new(
            self.cell_left(index) + self.icon_inset,
            self.cell_top + self.icon_inset,
            self.icon_size,
            self.icon_size,
        )
    }

    /// Horizontal centre used for the cell's text.
    pub fn text_center(&self, index: usize) -> f32 {
        self.cell_left(index) + self.cell_width / 2.0
    }

    /// Cell indices in drawing order, left to right.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        1..=FORECAST_STRIP_LEN
    }
}

/// Positions used by the error card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorCardLayout {
    pub weekday: Point,
    pub date: Point,
    pub message: Point,
    /// "No weather data available", inside the detail pane.
    pub notice: Point,
}

/// Complete geometry for one device class.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub device_class: DeviceClass,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Background panes, drawn first and in order.
    pub panes: Vec<Pane>,
    pub header: HeaderLayout,
    pub primary: PrimaryLayout,
    pub detail: DetailLayout,
    pub forecast: ForecastStripLayout,
    pub error: ErrorCardLayout,
}

/// Layout for `device`. Pure: identical input yields identical output.
pub fn compute_layout(device: DeviceClass) -> LayoutSpec {
    match device {
        DeviceClass::Mobile => mobile_layout(),
        DeviceClass::Desktop => desktop_layout(),
    }
}

/// Stacked card: primary colour panel on top, dark detail panel beneath.
fn mobile_layout() -> LayoutSpec {
    let width = MOBILE_WIDTH as f32;
    let height = MOBILE_HEIGHT as f32;

    LayoutSpec {
        device_class: DeviceClass::Mobile,
        canvas_width: MOBILE_WIDTH,
        canvas_height: MOBILE_HEIGHT,
        panes: vec![
            Pane {
                rect: Rect::new(4.0, 300.0, width - 8.0, height - 300.0),
                radii: CornerRadii::corners(0.0, 0.0, PANE_RADIUS, PANE_RADIUS),
                colour: DARK,
            },
            Pane {
                rect: Rect::new(0.0, 0.0, width, 360.0),
                radii: CornerRadii::uniform(PANE_RADIUS),
                colour: PRIMARY,
            },
        ],
        header: HeaderLayout {
            weekday: Point::new(25.0, 40.0),
            date: Point::new(25.0, 65.0),
            location: Point::new(45.0, 105.0),
            pin: Rect::new(25.0, 93.0, 13.0, 13.0),
        },
        primary: PrimaryLayout {
            icon_tile: Rect::new(25.0, 135.0, 100.0, 100.0),
            icon_radius: 10.0,
            icon_outlined: false,
            temperature: Point::new(25.0, 310.0),
            condition: Point::new(25.0, 340.0),
        },
        detail: DetailLayout {
            label_left: 20.0,
            value_right: 300.0,
            rows: vec![
                DetailRow {
                    field: DetailField::FeelsLike,
                    baseline: 400.0,
                },
                DetailRow {
                    field: DetailField::Wind,
                    baseline: 440.0,
                },
                DetailRow {
                    field: DetailField::WindDirection,
                    baseline: 480.0,
                },
            ],
        },
        forecast: ForecastStripLayout {
            origin_left: 20.0,
            cell_width: FORECAST_CELL_WIDTH,
            cell_top: 505.0,
            cell_height: 125.0,
            cell_radius: 10.0,
            icon_inset: 10.0,
            icon_size: 50.0,
            icon_radius: 8.0,
            day_baseline: 586.0,
            temperature_baseline: 606.0,
            condition_baseline: 624.0,
        },
        error: ErrorCardLayout {
            weekday: Point::new(25.0, 40.0),
            date: Point::new(25.0, 65.0),
            message: Point::new(25.0, 110.0),
            notice: Point::new(20.0, 400.0),
        },
    }
}

/// Two panes: narrow hero on the left, wide detail pane on the right.
fn desktop_layout() -> LayoutSpec {
    let height = DESKTOP_HEIGHT as f32;

    LayoutSpec {
        device_class: DeviceClass::Desktop,
        canvas_width: DESKTOP_WIDTH,
        canvas_height: DESKTOP_HEIGHT,
        panes: vec![
            Pane {
                rect: Rect::new(280.0, 4.0, 360.0, height - 8.0),
                radii: CornerRadii::corners(0.0, PANE_RADIUS, PANE_RADIUS, 0.0),
                colour: DARK,
            },
            Pane {
                rect: Rect::new(0.0, 0.0, 300.0, height),
                radii: CornerRadii::uniform(PANE_RADIUS),
                colour: PRIMARY,
            },
        ],
        header: HeaderLayout {
            weekday: Point::new(25.0, 50.0),
            date: Point::new(25.0, 75.0),
            location: Point::new(45.0, 110.0),
            pin: Rect::new(25.0, 98.0, 13.0, 13.0),
        },
        primary: PrimaryLayout {
            icon_tile: Rect::new(25.0, 180.0, 100.0, 100.0),
            icon_radius: 10.0,
            icon_outlined: true,
            temperature: Point::new(25.0, 350.0),
            condition: Point::new(25.0, 380.0),
        },
        detail: DetailLayout {
            label_left: 330.0,
            value_right: 610.0,
            rows: vec![
                DetailRow {
                    field: DetailField::FeelsLike,
                    baseline: 60.0,
                },
                DetailRow {
                    field: DetailField::Pressure,
                    baseline: 100.0,
                },
                DetailRow {
                    field: DetailField::Humidity,
                    baseline: 140.0,
                },
                DetailRow {
                    field: DetailField::Wind,
                    baseline: 180.0,
                },
                DetailRow {
                    field: DetailField::WindDirection,
                    baseline: 220.0,
                },
            ],
        },
        forecast: ForecastStripLayout {
            origin_left: 330.0,
            cell_width: FORECAST_CELL_WIDTH,
            cell_top: 250.0,
            cell_height: 130.0,
            cell_radius: 10.0,
            icon_inset: 10.0,
            icon_size: 50.0,
            icon_radius: 8.0,
            day_baseline: 332.0,
            temperature_baseline: 352.0,
            condition_baseline: 370.0,
        },
        error: ErrorCardLayout {
            weekday: Point::new(25.0, 50.0),
            date: Point::new(25.0, 75.0),
            message: Point::new(25.0, 120.0),
            notice: Point::new(330.0, 60.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_offsets() {
        let strip = compute_layout(DeviceClass::Desktop).forecast;
        assert_eq!(strip.cell_left(1), 330.0);
        assert_eq!(strip.cell_left(2), 400.0);
        assert_eq!(strip.cell_left(4), 540.0);
        assert_eq!(strip.icon_slot(1), Rect::new(340.0, 260.0, 50.0, 50.0));
        assert_eq!(strip.text_center(1), 365.0);
    }

    #[test]
    fn test_detail_labels() {
        assert_eq!(DetailField::WindDirection.label(), "WIND DIRECTION");
        assert_eq!(DetailField::FeelsLike.label(), "FEELS LIKE");
    }
}
