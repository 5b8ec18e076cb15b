//! Planar geometry primitives.
//!
//! [`XY`] is the common coordinate model for both normalized track geometry
//! (Web-Mercator map units) and poster space. [`BoundingBox`] accumulates the
//! extent of point sequences.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::GpsPoint;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    pub const ZERO: XY = XY { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    pub fn component_mul(self, other: XY) -> XY {
        XY::new(self.x * other.x, self.y * other.y)
    }

    pub fn scale(self, k: f64) -> XY {
        XY::new(self.x * k, self.y * k)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for XY {
    type Output = XY;

    fn add(self, other: XY) -> XY {
        XY::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for XY {
    type Output = XY;

    fn sub(self, other: XY) -> XY {
        XY::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for XY {
    type Output = XY;

    fn mul(self, k: f64) -> XY {
        self.scale(k)
    }
}

impl Mul<XY> for f64 {
    type Output = XY;

    fn mul(self, p: XY) -> XY {
        p.scale(self)
    }
}

impl Mul for XY {
    type Output = XY;

    fn mul(self, other: XY) -> XY {
        self.component_mul(other)
    }
}

impl From<(f64, f64)> for XY {
    fn from((x, y): (f64, f64)) -> Self {
        XY::new(x, y)
    }
}

/// Axis-aligned bounding box, empty until the first point is added.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    corners: Option<(XY, XY)>,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding box of every point in every polyline.
    pub fn from_polylines<'a, I>(polylines: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<XY>>,
    {
        let mut bbox = Self::new();
        for line in polylines {
            bbox.extend_all(line.iter().copied());
        }
        bbox
    }

    pub fn extend(&mut self, p: XY) {
        self.corners = Some(match self.corners {
            None => (p, p),
            Some((min, max)) => (
                XY::new(min.x.min(p.x), min.y.min(p.y)),
                XY::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    pub fn extend_all<I: IntoIterator<Item = XY>>(&mut self, points: I) {
        for p in points {
            self.extend(p);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn min(&self) -> Option<XY> {
        self.corners.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<XY> {
        self.corners.map(|(_, max)| max)
    }

    pub fn width(&self) -> f64 {
        self.corners.map_or(0.0, |(min, max)| max.x - min.x)
    }

    pub fn height(&self) -> f64 {
        self.corners.map_or(0.0, |(min, max)| max.y - min.y)
    }

    pub fn size(&self) -> XY {
        XY::new(self.width(), self.height())
    }
}

/// Normalize a GPS coordinate into Web-Mercator map units.
///
/// x spans [0, 2] west to east, y grows southward so that map space and
/// poster space share the same orientation.
pub fn latlng_to_xy(point: &GpsPoint) -> XY {
    XY::new(lng_to_x(point.longitude), lat_to_y(point.latitude))
}

fn lng_to_x(lng: f64) -> f64 {
    lng / 180.0 + 1.0
}

/// Latitude limit of the square Web-Mercator world; the poles map to infinity.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

fn lat_to_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    0.5 - (std::f64::consts::FRAC_PI_4 * (1.0 + lat / 90.0)).tan().ln() / std::f64::consts::PI
}
