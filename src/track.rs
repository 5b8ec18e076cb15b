//! Track records handed over by the loader.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::geometry::{latlng_to_xy, BoundingBox, XY};
use crate::GpsPoint;

/// Which clock a track's start time is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBasis {
    #[default]
    Utc,
    Local,
}

/// One recorded activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier (typically the source file name)
    pub id: String,
    /// Sport type (e.g., "running", "cycling")
    pub sport_type: String,
    /// Start time with the offset of the place it was recorded
    pub start_time: DateTime<FixedOffset>,
    /// Polylines in Web-Mercator map units
    pub polylines: Vec<Vec<XY>>,
    /// Total length in meters
    pub length: f64,
    /// Flagged by the user for distinct treatment
    #[serde(default)]
    pub special: bool,
}

impl Track {
    /// Build a track from raw GPS segments.
    ///
    /// Invalid coordinates are dropped, segments with fewer than two valid
    /// points are skipped, and the length is the haversine length of what
    /// remains.
    pub fn from_gps_segments(
        id: &str,
        sport_type: &str,
        start_time: DateTime<FixedOffset>,
        segments: &[Vec<GpsPoint>],
    ) -> Result<Self> {
        let mut polylines = Vec::with_capacity(segments.len());
        let mut length = 0.0;
        let mut usable_points = 0;

        for segment in segments {
            let valid: Vec<&GpsPoint> = segment.iter().filter(|p| p.is_valid()).collect();
            if valid.len() < 2 {
                continue;
            }
            usable_points += valid.len();
            length += valid
                .windows(2)
                .map(|w| {
                    Haversine::distance(
                        Point::new(w[0].longitude, w[0].latitude),
                        Point::new(w[1].longitude, w[1].latitude),
                    )
                })
                .sum::<f64>();
            polylines.push(valid.into_iter().map(latlng_to_xy).collect());
        }

        if polylines.is_empty() {
            return Err(PosterError::InsufficientPoints {
                track_id: id.to_string(),
                point_count: usable_points,
                minimum_required: 2,
            });
        }

        Ok(Self {
            id: id.to_string(),
            sport_type: sport_type.to_string(),
            start_time,
            polylines,
            length,
            special: false,
        })
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_polylines(&self.polylines)
    }

    pub fn length_km(&self) -> f64 {
        self.length / 1000.0
    }

    pub fn start_time_in(&self, basis: TimeBasis) -> NaiveDateTime {
        match basis {
            TimeBasis::Utc => self.start_time.naive_utc(),
            TimeBasis::Local => self.start_time.naive_local(),
        }
    }

    pub fn start_date(&self, basis: TimeBasis) -> NaiveDate {
        self.start_time_in(basis).date()
    }
}
