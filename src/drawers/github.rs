//! GitHub-style contribution calendar, one block of week columns per year.

use chrono::{Datelike, Days, NaiveDate};

use crate::color::Color;
use crate::config::{GithubStyle, PosterConfig};
use crate::error::{OptionExt, Result};
use crate::geometry::XY;
use crate::ranges::format_float;
use crate::track_set::TrackSet;

use super::{distance_label, ensure_tracks, length_color, Shape, TextAnchor, TracksDrawer};

const EMPTY_DAY: Color = Color::rgb(0x44, 0x44, 0x44);
const WEEKS: usize = 54;
const DAY_PITCH: f64 = 3.5;
const DAY_SIZE: f64 = 2.6;
const YEAR_LABEL: f64 = 10.0;
/// Height of one year block: label, gap and seven day rows plus padding.
const YEAR_BLOCK: f64 = DAY_PITCH * 9.0 + YEAR_LABEL + 1.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct GithubDrawer;

impl TracksDrawer for GithubDrawer {
    fn name(&self) -> &'static str {
        "github"
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

        // Shrink uniformly when the blocks do not fit the target
        let natural = XY::new(WEEKS as f64 * DAY_PITCH, years.len() as f64 * YEAR_BLOCK);
        let scale = (size.x / natural.x).min(size.y / natural.y).min(1.0);

        let mut shapes = Vec::new();
        let mut block_origin = offset;
        for year in years {
            draw_year(tracks, config, year, scale, size.x, block_origin, &mut shapes)?;
            block_origin.y += YEAR_BLOCK * scale;
        }
        Ok(shapes)
    }
}

/// First day drawn for `year`.
pub fn calendar_start(year: i32, style: GithubStyle) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    match style {
        GithubStyle::AlignFirstday => Some(first),
        GithubStyle::AlignMonday => {
            first.checked_sub_days(Days::new(first.weekday().num_days_from_monday() as u64))
        }
    }
}

fn draw_year(
    tracks: &TrackSet,
    config: &PosterConfig,
    year: i32,
    scale: f64,
    width: f64,
    origin: XY,
    shapes: &mut Vec<Shape>,
) -> Result<()> {
    let year_length: f64 = tracks
        .tracks()
        .iter()
        .filter(|t| t.start_date(tracks.time_basis()).year() == year)
        .map(|t| t.length)
        .sum();

    shapes.push(Shape::Text {
        position: origin,
        text: year.to_string(),
        color: config.colors.text,
        font_size: YEAR_LABEL * scale,
        anchor: TextAnchor::Start,
    });
    shapes.push(Shape::Text {
        position: XY::new(origin.x + width, origin.y),
        text: format!(
            "{} {}",
            format_float(config.units.m2u(year_length)),
            config.units.label()
        ),
        color: config.colors.text,
        font_size: 0.5 * YEAR_LABEL * scale,
        anchor: TextAnchor::End,
    });

    let mut day = calendar_start(year, config.github_style).ok_or_layout("github: year out of range")?;
    let top = origin.y + (YEAR_LABEL + 2.0) * scale;

    'weeks: for week in 0..WEEKS {
        let x = origin.x + week as f64 * DAY_PITCH * scale;
        for weekday in 0..7 {
            if day.year() > year {
                break 'weeks;
            }
            let y = top + (weekday + 1) as f64 * DAY_PITCH * scale;
            let date_text = day.format("%Y-%m-%d").to_string();

            let (fill, title) = match tracks.day_total(day) {
                Some(total) => (
                    length_color(
                        config,
                        tracks.length_range_by_date(),
                        total.length,
                        total.has_special,
                    ),
                    distance_label(config, &date_text, total.length),
                ),
                None => (EMPTY_DAY, date_text),
            };
            shapes.push(Shape::Rect {
                origin: XY::new(x, y),
                size: XY::new(DAY_SIZE * scale, DAY_SIZE * scale),
                fill,
                title: Some(title),
            });

            day = match day.succ_opt() {
                Some(next) => next,
                None => break 'weeks,
            };
        }
    }
    Ok(())
}
