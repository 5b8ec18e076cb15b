//! Month-of-life chart: one square per calendar month, a row per year.

use std::collections::BTreeMap;

use chrono::Datelike;
use log::debug;

use crate::color::Color;
use crate::config::PosterConfig;
use crate::error::{PosterError, Result};
use crate::geometry::XY;
use crate::grid::GridLayout;
use crate::ranges::ValueRange;
use crate::track_set::TrackSet;

use super::{distance_label, ensure_tracks, length_color, Shape, TracksDrawer};

const EMPTY_MONTH: Color = Color::rgb(0x44, 0x44, 0x44);
const MONTHS: usize = 12;
const CELL_FILL: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default)]
pub struct MonthOfLifeDrawer;

/// Summed length and special flag of one month.
#[derive(Debug, Clone, Copy, Default)]
struct MonthTotal {
    length: f64,
    has_special: bool,
}

fn month_totals(tracks: &TrackSet) -> BTreeMap<(i32, u32), MonthTotal> {
    let mut totals: BTreeMap<(i32, u32), MonthTotal> = BTreeMap::new();
    for day in tracks.day_totals() {
        let entry = totals.entry((day.date.year(), day.date.month())).or_default();
        entry.length += day.length;
        entry.has_special |= day.has_special;
    }
    totals
}

impl TracksDrawer for MonthOfLifeDrawer {
    fn name(&self) -> &'static str {
        "monthoflife"
    }

    fn draw(
        &self,
        tracks: &TrackSet,
        config: &PosterConfig,
        size: XY,
        offset: XY,
    ) -> Result<Vec<Shape>> {
        ensure_tracks(tracks, self.name())?;
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(PosterError::layout(format!(
                "monthoflife: {:.1}x{:.1} has no room for cells",
                size.x, size.y
            )));
        }
        let years = tracks.years().all();
        let grid = GridLayout {
            cell_size: (size.x / MONTHS as f64).min(size.y / years.len() as f64),
            columns: MONTHS,
            rows: years.len(),
        };

        let totals = month_totals(tracks);
        let mut month_range = ValueRange::new();
        for total in totals.values() {
            month_range.extend(total.length);
        }
        debug!(
            "[MonthOfLifeDrawer] {} years, {} active months, cell {:.2}",
            years.len(),
            totals.len(),
            grid.cell_size
        );

        let cell = XY::new(grid.cell_size, grid.cell_size);
        let inset = 0.5 * (1.0 - CELL_FILL) * cell;
        let mut shapes = Vec::with_capacity(grid.capacity());
        for (row, &year) in years.iter().enumerate() {
            for month in 1..=MONTHS as u32 {
                let index = row * MONTHS + month as usize - 1;
                let label = format!("{}-{:02}", year, month);
                let (fill, title) = match totals.get(&(year, month)) {
                    Some(total) => (
                        length_color(config, &month_range, total.length, total.has_special),
                        distance_label(config, &label, total.length),
                    ),
                    None => (EMPTY_MONTH, label),
                };
                shapes.push(Shape::Rect {
                    origin: grid.cell_origin(index, size, offset) + inset,
                    size: CELL_FILL * cell,
                    fill,
                    title: Some(title),
                });
            }
        }
        Ok(shapes)
    }
}
