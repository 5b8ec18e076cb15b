//! # Poster
//!
//! Composes a complete poster: background, optional header and footer, and
//! the drawer's shapes in the remaining area.
//!
//! Per-year circular posters go through [`render_year`], a pure function of
//! the loaded tracks, so the years can be rendered in any order or in
//! parallel and one failing year never affects another.

use std::collections::BTreeSet;

use chrono::Datelike;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::Color;
use crate::config::PosterConfig;
use crate::drawers::{PosterKind, Shape, TextAnchor};
use crate::error::Result;
use crate::geometry::XY;
use crate::ranges::{format_float, YearRange};
use crate::track::Track;
use crate::track_set::{TrackFilter, TrackSet};

/// A finished poster, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterOutput {
    pub kind: PosterKind,
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

/// Result of a render that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(PosterOutput),
    /// Filtering left nothing to draw
    NoTracks,
}

impl RenderOutcome {
    pub fn poster(&self) -> Option<&PosterOutput> {
        match self {
            RenderOutcome::Rendered(poster) => Some(poster),
            RenderOutcome::NoTracks => None,
        }
    }
}

/// Canvas height and the rectangle handed to the drawer.
fn frame(config: &PosterConfig, kind: PosterKind) -> (f64, XY, XY) {
    if kind.is_plain() {
        let side = config.width;
        (side, XY::new(side - 20.0, side - 20.0), XY::new(10.0, 10.0))
    } else if !kind.has_footer() {
        // Header only; the chart takes the footer's space
        (
            config.height,
            XY::new(config.width - 20.0, config.height - 40.0),
            XY::new(10.0, 30.0),
        )
    } else {
        (
            config.height,
            XY::new(config.width - 20.0, config.height - 60.0),
            XY::new(10.0, 30.0),
        )
    }
}

/// Render the visible tracks of `tracks` as a `kind` poster.
pub fn render_poster(
    tracks: &TrackSet,
    config: &PosterConfig,
    kind: PosterKind,
) -> Result<RenderOutcome> {
    if tracks.is_empty() {
        warn!("[Poster] No tracks to draw, skipping {:?} poster", kind);
        return Ok(RenderOutcome::NoTracks);
    }
    config.validate()?;

    let (height, size, offset) = frame(config, kind);
    let mut shapes = Vec::new();
    if !kind.is_plain() {
        draw_header(config, &mut shapes);
    }
    if kind.has_footer() {
        draw_footer(tracks, config, height, &mut shapes);
    }
    let drawer = kind.drawer();
    shapes.extend(drawer.draw(tracks, config, size, offset)?);

    info!(
        "[Poster] Rendered {} poster: {} tracks, {} shapes",
        drawer.name(),
        tracks.len(),
        shapes.len()
    );
    Ok(RenderOutcome::Rendered(PosterOutput {
        kind,
        width: config.width,
        height,
        background: config.colors.background,
        shapes,
    }))
}

fn draw_header(config: &PosterConfig, shapes: &mut Vec<Shape>) {
    shapes.push(Shape::Text {
        position: XY::new(10.0, 20.0),
        text: config.title.clone(),
        color: config.colors.text,
        font_size: 12.0,
        anchor: TextAnchor::Start,
    });
}

fn draw_footer(tracks: &TrackSet, config: &PosterConfig, height: f64, shapes: &mut Vec<Shape>) {
    let units = config.units;
    let distance = |meters: f64| format!("{} {}", format_float(units.m2u(meters)), units.label());
    let stats = tracks.stats();
    let weeks = active_weeks(tracks).max(1);
    let average = stats.total_length / stats.track_count.max(1) as f64;
    let x = |at: f64| at * config.width / 200.0;

    let mut text = |position: XY, value: String, font_size: f64| {
        shapes.push(Shape::Text {
            position,
            text: value,
            color: config.colors.text,
            font_size,
            anchor: TextAnchor::Start,
        })
    };

    text(XY::new(x(10.0), height - 20.0), "ATHLETE".to_string(), 4.0);
    text(XY::new(x(10.0), height - 10.0), config.athlete.clone(), 9.0);
    text(XY::new(x(120.0), height - 20.0), "STATISTICS".to_string(), 4.0);
    text(
        XY::new(x(120.0), height - 15.0),
        format!("Number: {}", stats.track_count),
        3.0,
    );
    text(
        XY::new(x(120.0), height - 10.0),
        format!("Weekly: {}", format_float(stats.track_count as f64 / weeks as f64)),
        3.0,
    );
    text(
        XY::new(x(141.0), height - 15.0),
        format!("Total: {}", distance(stats.total_length)),
        3.0,
    );
    text(
        XY::new(x(141.0), height - 10.0),
        format!("Avg: {}", distance(average)),
        3.0,
    );
    text(
        XY::new(x(167.0), height - 15.0),
        format!("Min: {}", distance(stats.length_range.lower().unwrap_or(0.0))),
        3.0,
    );
    text(
        XY::new(x(167.0), height - 10.0),
        format!("Max: {}", distance(stats.length_range.upper().unwrap_or(0.0))),
        3.0,
    );
}

/// Number of distinct ISO weeks with at least one track.
fn active_weeks(tracks: &TrackSet) -> usize {
    tracks
        .tracks()
        .iter()
        .map(|t| {
            let week = t.start_date(tracks.time_basis()).iso_week();
            (week.year(), week.week())
        })
        .collect::<BTreeSet<_>>()
        .len()
}

/// Render the circular poster of a single `year`.
///
/// Builds its own track set from `all_tracks`, applies `filter` restricted to
/// `year`, and renders it. Nothing outside the arguments is read or written.
pub fn render_year(
    all_tracks: &[Track],
    filter: &TrackFilter,
    config: &PosterConfig,
    year: i32,
) -> Result<RenderOutcome> {
    let mut set = TrackSet::with_config(config);
    set.set_tracks(all_tracks.to_vec());
    set.apply(TrackFilter {
        years: YearRange::single(year),
        ..filter.clone()
    });

    let mut year_config = config.clone();
    year_config.title = year.to_string();
    render_poster(&set, &year_config, PosterKind::Circular)
}

/// Years covered by `all_tracks` after applying `filter`.
pub fn filtered_years(
    all_tracks: &[Track],
    filter: &TrackFilter,
    config: &PosterConfig,
) -> Vec<i32> {
    let mut set = TrackSet::with_config(config);
    set.set_tracks(all_tracks.to_vec());
    set.apply(filter.clone());
    set.years().all()
}

/// Render one circular poster per year of the filtered tracks.
///
/// Results are returned in ascending year order; each year succeeds or
/// fails on its own.
pub fn render_years(
    all_tracks: &[Track],
    filter: &TrackFilter,
    config: &PosterConfig,
) -> Vec<(i32, Result<RenderOutcome>)> {
    let years = filtered_years(all_tracks, filter, config);
    info!("[Poster] Rendering {} yearly posters", years.len());

    #[cfg(feature = "parallel")]
    let iter = years.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = years.into_iter();

    iter.map(|year| (year, render_year(all_tracks, filter, config, year)))
        .collect()
}
