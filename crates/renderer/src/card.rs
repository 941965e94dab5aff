//! Composition of the full weather card.
//!
//! Drawing happens in a fixed order: panes, header, primary block, detail
//! column, forecast tiles, cell overlays, forecast text. Icon tiles arrive already painted (see
//! [`crate::icons::IconTile`]) and are only composited here, one at a time.

use chrono::{Datelike, NaiveDate, TimeZone};
use tiny_skia::Pixmap;

use card_common::{
    format_long_date, short_weekday_name, weekday_name, CardError, CardResult, ForecastDay,
    WeatherSnapshot, FORECAST_STRIP_LEN,
};

use crate::geometry::{draw_rounded_rect, Point, RectStyle};
use crate::icons::{draw_pin, IconTile};
use crate::layout::{DetailField, LayoutSpec};
use crate::palette::CELL_OVERLAY;
use crate::text::{draw_text, FontSpec, Fonts, TextAlign, TextStyle};

const WEEKDAY_STYLE: TextStyle = TextStyle::new(FontSpec::bold(24.0));
const BODY_STYLE: TextStyle = TextStyle::new(FontSpec::regular(16.0));
const TEMPERATURE_STYLE: TextStyle = TextStyle::new(FontSpec::bold(64.0));
const DETAIL_LABEL_STYLE: TextStyle = TextStyle::new(FontSpec::bold(16.0));
const DETAIL_VALUE_STYLE: TextStyle = TextStyle::new(FontSpec::regular(16.0)).aligned(TextAlign::Right);
const STRIP_DAY_STYLE: TextStyle = TextStyle::new(FontSpec::regular(16.0)).aligned(TextAlign::Center);
const STRIP_TEMP_STYLE: TextStyle = TextStyle::new(FontSpec::bold(16.0)).aligned(TextAlign::Center);
const STRIP_CONDITION_STYLE: TextStyle =
    TextStyle::new(FontSpec::regular(14.0)).aligned(TextAlign::Center);

/// A card being drawn for one layout.
pub struct CardCanvas<'a> {
    pixmap: Pixmap,
    layout: LayoutSpec,
    fonts: &'a Fonts,
}

impl<'a> CardCanvas<'a> {
    pub fn new(layout: LayoutSpec, fonts: &'a Fonts) -> Self {
        // Layout canvas sizes are fixed non-zero constants.
        let pixmap = Pixmap::new(layout.canvas_width, layout.canvas_height)
            .expect("layout canvas dimensions are non-zero");
        Self {
            pixmap,
            layout,
            fonts,
        }
    }

    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) {
        draw_text(&mut self.pixmap, self.fonts, text, at, style);
    }

    pub fn draw_panes(&mut self) {
        for pane in &self.layout.panes {
            draw_rounded_rect(
                &mut self.pixmap,
                pane.rect,
                pane.radii,
                &RectStyle::fill(pane.colour),
            );
        }
    }

    /// Bold weekday name above an already formatted date.
    pub fn draw_dateline(&mut self, today: NaiveDate, date: &str, at_weekday: Point, at_date: Point) {
        self.text(weekday_name(today.weekday()), at_weekday, &WEEKDAY_STYLE);
        self.text(date, at_date, &BODY_STYLE);
    }

    pub fn draw_header(&mut self, snapshot: &WeatherSnapshot, today: NaiveDate) {
        let header = self.layout.header;
        self.draw_dateline(today, &format_long_date(today), header.weekday, header.date);
        draw_pin(&mut self.pixmap, header.pin);
        self.text(&snapshot.location_label(), header.location, &BODY_STYLE);
    }

    pub fn draw_current_icon(&mut self, tile: &IconTile) {
        tile.place(&mut self.pixmap, self.layout.primary.icon_tile);
    }

    pub fn draw_primary(&mut self, snapshot: &WeatherSnapshot) {
        let primary = self.layout.primary;
        self.text(&snapshot.temperature_label(), primary.temperature, &TEMPERATURE_STYLE);
        self.text(&snapshot.condition_label(), primary.condition, &BODY_STYLE);
    }

    pub fn draw_details(&mut self, snapshot: &WeatherSnapshot) {
        let left = self.layout.detail.label_left;
        let right = self.layout.detail.value_right;
        let rows = self.layout.detail.rows.clone();

        for row in rows {
            let value = match row.field {
                DetailField::FeelsLike => snapshot.feels_like_label(),
                DetailField::Pressure => snapshot.pressure_label(),
                DetailField::Humidity => snapshot.humidity_label(),
                DetailField::Wind => snapshot.wind_label(),
                DetailField::WindDirection => snapshot.wind_direction().to_string(),
            };
            self.text(row.field.label(), Point::new(left, row.baseline), &DETAIL_LABEL_STYLE);
            self.text(&value, Point::new(right, row.baseline), &DETAIL_VALUE_STYLE);
        }
    }

    /// Translucent cell overlays for the strip, painted over the tiles.
    pub fn draw_forecast_cells(&mut self) {
        let strip = self.layout.forecast;
        for index in strip.indices() {
            draw_rounded_rect(
                &mut self.pixmap,
                strip.cell_rect(index),
                strip.cell_radius,
                &RectStyle::fill(CELL_OVERLAY),
            );
        }
    }

    /// Place tiles in cells 1..=4, in order.
    pub fn place_forecast_tiles(&mut self, tiles: &[IconTile]) -> CardResult<()> {
        if tiles.len() != FORECAST_STRIP_LEN {
            return Err(CardError::Render(format!(
                "expected {} forecast tiles, got {}",
                FORECAST_STRIP_LEN,
                tiles.len()
            )));
        }
        let strip = self.layout.forecast;
        for (index, tile) in strip.indices().zip(tiles) {
            tile.place(&mut self.pixmap, strip.icon_slot(index));
        }
        Ok(())
    }

    /// Day name, temperature and condition under each tile.
    pub fn draw_forecast_text<Tz: TimeZone>(&mut self, days: &[ForecastDay], tz: &Tz) {
        let strip = self.layout.forecast;
        for (index, day) in strip.indices().zip(days) {
            let x = strip.text_center(index);
            let weekday = day.weekday_in(tz).map(short_weekday_name).unwrap_or("");
            self.text(weekday, Point::new(x, strip.day_baseline), &STRIP_DAY_STYLE);
            self.text(
                &day.temperature_label(),
                Point::new(x, strip.temperature_baseline),
                &STRIP_TEMP_STYLE,
            );
            self.text(
                &day.condition_main,
                Point::new(x, strip.condition_baseline),
                &STRIP_CONDITION_STYLE,
            );
        }
    }

    /// Left-anchored 16px message used by the error card.
    pub fn draw_message(&mut self, message: &str, at: Point, bold: bool) {
        let font = if bold {
            FontSpec::bold(16.0)
        } else {
            FontSpec::regular(16.0)
        };
        self.text(message, at, &TextStyle::new(font));
    }
}

/// Everything needed to draw a complete weather card.
pub struct WeatherCard<'a, Tz: TimeZone> {
    pub snapshot: &'a WeatherSnapshot,
    /// The four strip days, in display order.
    pub forecast: &'a [ForecastDay],
    pub current_tile: Option<&'a IconTile>,
    pub forecast_tiles: &'a [IconTile],
    pub today: NaiveDate,
    pub timezone: &'a Tz,
}

/// Draw `card` onto a fresh canvas for `layout`.
pub fn compose_weather_card<Tz: TimeZone>(
    layout: LayoutSpec,
    fonts: &Fonts,
    card: &WeatherCard<'_, Tz>,
) -> CardResult<Pixmap> {
    let mut canvas = CardCanvas::new(layout, fonts);
    canvas.draw_panes();
    canvas.draw_header(card.snapshot, card.today);
    if let Some(tile) = card.current_tile {
        canvas.draw_current_icon(tile);
    }
    canvas.draw_primary(card.snapshot);
    canvas.draw_details(card.snapshot);
    canvas.place_forecast_tiles(card.forecast_tiles)?;
    canvas.draw_forecast_cells();
    canvas.draw_forecast_text(card.forecast, card.timezone);
    Ok(canvas.into_pixmap())
}
