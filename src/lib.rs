//! # Track Poster
//!
//! Layout engine for posters of GPS tracks.
//!
//! This library provides:
//! - Filtering and aggregation of loaded tracks (year, sport type, distance)
//! - Aspect-preserving projection of tracks into poster rectangles
//! - Grid, circular calendar, GitHub-style calendar and month-of-life layouts
//! - Distance-tier coloring with cascading fallback
//!
//! Output is a list of drawing primitives ([`Shape`]) that a renderer turns
//! into SVG or anything else.
//!
//! ## Features
//!
//! - **`parallel`** - Render per-year posters in parallel with rayon
//! - **`cli`** - Build the `track-poster` command line tool
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::DateTime;
//! use track_poster::{
//!     render_poster, GpsPoint, PosterConfig, PosterKind, TimeBasis, Track, TrackSet,
//! };
//!
//! let points = vec![
//!     GpsPoint::new(51.5074, -0.1278),
//!     GpsPoint::new(51.5080, -0.1290),
//!     GpsPoint::new(51.5090, -0.1300),
//! ];
//! let start = DateTime::parse_from_rfc3339("2021-05-01T07:30:00+01:00").unwrap();
//! let track = Track::from_gps_segments("run-1", "running", start, &[points]).unwrap();
//!
//! let set = TrackSet::from_tracks(vec![track], TimeBasis::Utc);
//! let outcome = render_poster(&set, &PosterConfig::default(), PosterKind::Grid).unwrap();
//! assert!(outcome.poster().is_some());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, PosterError, Result};

// Normalized coordinates and bounding boxes
pub mod geometry;
pub use geometry::{latlng_to_xy, BoundingBox, XY};

// Fitting polylines into a target rectangle
pub mod projection;
pub use projection::{project, ProjectedPolylines, Projection};

// Square-cell grid layout
pub mod grid;
pub use grid::{compute_grid, GridLayout};

pub mod color;
pub use color::{interpolate_color, Color};

// Distance tiers
pub mod tiers;
pub use tiers::{classify, DistanceThresholds, Tier, TierColors};

pub mod ranges;
pub use ranges::{format_float, Units, ValueRange, YearRange};

pub mod track;
pub use track::{TimeBasis, Track};

// Filtered view over loaded tracks
pub mod track_set;
pub use track_set::{DayTotal, FilterState, TrackFilter, TrackSet, TrackSetStats};

pub mod config;
pub use config::{ColorScheme, GithubStyle, PosterConfig};

// Layout strategies
pub mod drawers;
pub use drawers::{
    CircularDrawer, GithubDrawer, GridDrawer, MonthOfLifeDrawer, PosterKind, Shape, TextAnchor,
    TracksDrawer,
};

// Poster composition and per-year rendering
pub mod poster;
pub use poster::{
    filtered_years, render_poster, render_year, render_years, PosterOutput, RenderOutcome,
};

/// A GPS point with latitude/longitude coordinates.
///
/// # Example
/// ```
/// use track_poster::GpsPoint;
/// let point = GpsPoint::new(51.5074, -0.1278); // London
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gps_point_validation() {
        assert!(GpsPoint::new(51.5074, -0.1278).is_valid());
        assert!(!GpsPoint::new(91.0, 0.0).is_valid());
        assert!(!GpsPoint::new(0.0, 181.0).is_valid());
        assert!(!GpsPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_gps_point_json() {
        let point: GpsPoint =
            serde_json::from_str(r#"{"latitude": 48.1, "longitude": 11.5}"#).unwrap();
        assert_eq!(point, GpsPoint::new(48.1, 11.5));
    }
}
