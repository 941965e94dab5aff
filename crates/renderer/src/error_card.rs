//! Fallback card shown when a weather card cannot be produced.

use chrono::NaiveDate;
use tiny_skia::Pixmap;

use card_common::{format_short_date, DeviceClass, UNKNOWN_CITY_MESSAGE};

use crate::card::CardCanvas;
use crate::layout::compute_layout;
use crate::text::Fonts;

/// Shown in the detail pane in place of readings.
pub const NO_DATA_NOTICE: &str = "No weather data available";

/// Render the error card for `device`.
///
/// Never fails: missing fonts only drop the text, the panes are always drawn.
/// A blank or missing message shows "Unknown city". The date is written
/// `dd/mm/yyyy`.
pub fn render_error_card(
    fonts: &Fonts,
    device: DeviceClass,
    message: Option<&str>,
    today: NaiveDate,
) -> Pixmap {
    let message = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(UNKNOWN_CITY_MESSAGE);

    let mut canvas = CardCanvas::new(compute_layout(device), fonts);
    let positions = canvas.layout().error;

    canvas.draw_panes();
    canvas.draw_dateline(today, &format_short_date(today), positions.weekday, positions.date);
    canvas.draw_message(message, positions.message, false);
    canvas.draw_message(NO_DATA_NOTICE, positions.notice, true);
    canvas.into_pixmap()
}
