//! # Drawers
//!
//! Each drawer turns the visible tracks of a [`TrackSet`] into drawing
//! primitives placed inside a target rectangle of the poster:
//!
//! - [`GridDrawer`]: one track per square cell of a near-square grid
//! - [`CircularDrawer`]: one ring per year, one sector per active day
//! - [`GithubDrawer`]: one contribution calendar per year
//! - [`MonthOfLifeDrawer`]: one square per month, a row per year
//!
//! Primitives are plain data; serializing them (SVG, canvas, ...) is left to
//! the consumer.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::PosterConfig;
use crate::error::{PosterError, Result};
use crate::geometry::XY;
use crate::ranges::ValueRange;
use crate::tiers::classify;
use crate::track_set::TrackSet;

pub mod circular;
pub mod github;
pub mod grid;
pub mod month_of_life;

pub use circular::CircularDrawer;
pub use github::GithubDrawer;
pub use grid::GridDrawer;
pub use month_of_life::MonthOfLifeDrawer;

/// Horizontal text alignment relative to the insert point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A drawing primitive in poster coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polyline {
        points: Vec<XY>,
        stroke: Color,
        stroke_width: f64,
        title: Option<String>,
        desc: Option<String>,
    },
    Rect {
        origin: XY,
        size: XY,
        fill: Color,
        title: Option<String>,
    },
    Line {
        start: XY,
        end: XY,
        stroke: Color,
        stroke_width: f64,
    },
    /// Annular sector; angles in radians, clockwise from 12 o'clock
    Sector {
        center: XY,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
    },
    Text {
        position: XY,
        text: String,
        color: Color,
        font_size: f64,
        anchor: TextAnchor,
    },
}

/// Lays out the visible tracks inside `offset..offset+size`.
pub trait TracksDrawer {
    fn name(&self) -> &'static str;

    fn draw(
        &self,
        tracks: &TrackSet,
        config: &PosterConfig,
        size: XY,
        offset: XY,
    ) -> Result<Vec<Shape>>;
}

/// Poster type selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterKind {
    #[default]
    Grid,
    Circular,
    Github,
    MonthOfLife,
}

impl PosterKind {
    pub fn drawer(self) -> Box<dyn TracksDrawer + Send + Sync> {
        match self {
            PosterKind::Grid => Box::new(GridDrawer),
            PosterKind::Circular => Box::new(CircularDrawer),
            PosterKind::Github => Box::new(GithubDrawer),
            PosterKind::MonthOfLife => Box::new(MonthOfLifeDrawer),
        }
    }

    /// Circular posters are drawn without header and footer.
    pub fn is_plain(self) -> bool {
        matches!(self, PosterKind::Circular)
    }

    /// Whether the statistics footer is drawn below the tracks.
    pub fn has_footer(self) -> bool {
        matches!(self, PosterKind::Grid | PosterKind::Github)
    }
}

impl std::str::FromStr for PosterKind {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" => Ok(PosterKind::Grid),
            "circular" => Ok(PosterKind::Circular),
            "github" => Ok(PosterKind::Github),
            "monthoflife" => Ok(PosterKind::MonthOfLife),
            other => Err(PosterError::parameter(format!("unknown poster type '{}'", other))),
        }
    }
}

/// Stroke or fill color for `length` meters: distance tier first, length
/// gradient over `length_range` as the fallback.
pub fn length_color(
    config: &PosterConfig,
    length_range: &ValueRange,
    length: f64,
    special: bool,
) -> Color {
    let default_color = config.colors.default_color(length_range, length, special);
    classify(
        length / 1000.0,
        &config.thresholds,
        &config.colors.tiers,
        default_color,
    )
}

/// `YYYY-MM-DD 12.3 km` style label.
pub(crate) fn distance_label(config: &PosterConfig, prefix: &str, length: f64) -> String {
    format!(
        "{} {} {}",
        prefix,
        crate::ranges::format_float(config.units.m2u(length)),
        config.units.label()
    )
}

fn ensure_tracks(tracks: &TrackSet, drawer: &str) -> Result<()> {
    if tracks.is_empty() {
        return Err(PosterError::layout(format!("{}: no tracks to draw", drawer)));
    }
    Ok(())
}
