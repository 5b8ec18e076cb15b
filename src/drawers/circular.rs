//! Circular calendar: one ring per year, one sector per active day.
//!
//! Days run clockwise from 12 o'clock. A day's sector grows outward from a
//! quarter of the outer radius in proportion to the day's summed length,
//! relative to the longest day of the visible set.

use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::config::PosterConfig;
use crate::error::{OptionExt, PosterError, Result};
use crate::geometry::XY;
use crate::grid::compute_grid;
use crate::ranges::ValueRange;
use crate::track_set::TrackSet;

use super::{ensure_tracks, length_color, Shape, TextAnchor, TracksDrawer};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CircularDrawer;

impl TracksDrawer for CircularDrawer {
    fn name(&self) -> &'static str {
        "circular"
    }

    fn draw(
        &self,
        tracks: &TrackSet,
        config: &PosterConfig,
        size: XY,
        offset: XY,
    ) -> Result<Vec<Shape>> {
        ensure_tracks(tracks, self.name())?;
        let years = tracks.years().all();
        let grid = compute_grid(years.len(), size)?;

        let cell = XY::new(size.x / grid.columns as f64, size.y / grid.rows as f64);
        let margin = XY::new(
            if grid.columns > 1 { 4.0 } else { 0.0 },
            if grid.rows > 1 { 8.0 } else { 0.0 },
        );
        let sub_size = cell - 2.0 * margin;

        let mut shapes = Vec::new();
        for (i, &year) in years.iter().enumerate() {
            let slot = XY::new((i % grid.columns) as f64, (i / grid.columns) as f64);
            draw_year(
                tracks,
                config,
                year,
                sub_size,
                offset + margin + cell * slot,
                &mut shapes,
            )?;
        }
        Ok(shapes)
    }
}

fn days_in_year(year: i32) -> Option<i64> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
    Some((end - start).num_days())
}

fn days_in_month(date: NaiveDate) -> Option<i64> {
    let first = date.with_day(1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((next - first).num_days())
}

fn polar(center: XY, radius: f64, angle: f64) -> XY {
    center + radius * XY::new(angle.sin(), -angle.cos())
}

fn draw_year(
    tracks: &TrackSet,
    config: &PosterConfig,
    year: i32,
    size: XY,
    offset: XY,
    shapes: &mut Vec<Shape>,
) -> Result<()> {
    let min_size = size.x.min(size.y);
    let outer_radius = 0.5 * min_size - 6.0;
    if outer_radius <= 0.0 {
        return Err(PosterError::layout(format!(
            "circular: {:.1}x{:.1} is too small for a year ring",
            size.x, size.y
        )));
    }
    let radius_range = ValueRange::from_pair(outer_radius / 4.0, outer_radius);
    let inner_radius = outer_radius / 4.0;
    let center = offset + 0.5 * size;
    let text = config.colors.text;

    shapes.push(Shape::Text {
        position: center,
        text: year.to_string(),
        color: text,
        font_size: min_size * 4.0 / 80.0,
        anchor: TextAnchor::Middle,
    });

    let day_count = days_in_year(year).ok_or_layout("circular: year out of range")?;
    let step = TAU / day_count as f64;
    let max_day_length = tracks.length_range_by_date().upper().unwrap_or(0.0);
    let mut active_days = 0;

    let mut date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_layout("circular: year out of range")?;
    for day in 0..day_count {
        let a1 = day as f64 * step;
        let a2 = (day + 1) as f64 * step;

        if date.day() == 1 {
            let month_days = days_in_month(date).ok_or_layout("circular: month out of range")?;
            let a3 = (day + month_days - 1) as f64 * step;
            shapes.push(Shape::Line {
                start: polar(center, outer_radius + 1.0, a1),
                end: polar(center, outer_radius + 6.0, a1),
                stroke: text,
                stroke_width: 0.3,
            });
            shapes.push(Shape::Text {
                position: polar(center, outer_radius + 4.0, 0.5 * (a1 + a3)),
                text: MONTH_ABBREVIATIONS[date.month0() as usize].to_string(),
                color: text,
                font_size: min_size * 3.0 / 80.0,
                anchor: TextAnchor::Middle,
            });
        }

        if let Some(total) = tracks.day_total(date) {
            if max_day_length > 0.0 {
                let fill = length_color(
                    config,
                    tracks.length_range_by_date(),
                    total.length,
                    total.has_special,
                );
                shapes.push(Shape::Sector {
                    center,
                    inner_radius,
                    outer_radius: inner_radius
                        + radius_range.diameter() * total.length / max_day_length,
                    start_angle: a1,
                    end_angle: a2,
                    fill,
                });
                active_days += 1;
            }
        }

        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    debug!("[CircularDrawer] {}: {} active days", year, active_days);
    Ok(())
}
