//! Fit track geometry into a destination rectangle.
//!
//! The source bounding box is scaled uniformly so that it fits entirely in the
//! destination, centered along the axis with leftover space, then translated
//! by the destination offset. Degenerate extents never divide by zero: a zero
//! width or height borrows the other axis's factor, and a single point maps to
//! the center of the destination.

use crate::geometry::{BoundingBox, XY};

/// A uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub translate: XY,
}

impl Projection {
    /// Compute the transform mapping `source` into the rectangle `offset..offset+size`.
    pub fn fit(source: &BoundingBox, size: XY, offset: XY) -> Self {
        let center = offset + 0.5 * size;
        let (min, extent) = match source.min() {
            Some(min) => (min, source.size()),
            None => {
                return Self {
                    scale: 0.0,
                    translate: center,
                }
            }
        };

        let scale_x = (extent.x > 0.0).then(|| size.x / extent.x);
        let scale_y = (extent.y > 0.0).then(|| size.y / extent.y);
        let scale = match (scale_x, scale_y) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(sx), None) => sx,
            (None, Some(sy)) => sy,
            (None, None) => {
                return Self {
                    scale: 0.0,
                    translate: center,
                }
            }
        };

        Self {
            scale,
            translate: offset + 0.5 * (size - scale * extent) - scale * min,
        }
    }

    #[inline]
    pub fn apply(&self, p: XY) -> XY {
        self.translate + self.scale * p
    }
}

/// Polylines viewed through a [`Projection`].
///
/// Nothing is computed up front; every call to [`lines`](Self::lines)
/// starts a fresh pass over the borrowed source geometry.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedPolylines<'a> {
    polylines: &'a [Vec<XY>],
    projection: Projection,
}

impl<'a> ProjectedPolylines<'a> {
    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Iterate the projected polylines, preserving point order and grouping.
    pub fn lines(&self) -> impl Iterator<Item = impl Iterator<Item = XY> + 'a> + 'a {
        let projection = self.projection;
        let polylines = self.polylines;
        polylines
            .iter()
            .map(move |line| line.iter().map(move |&p| projection.apply(p)))
    }

    pub fn to_vec(&self) -> Vec<Vec<XY>> {
        self.lines().map(|line| line.collect()).collect()
    }
}

/// Project `polylines` (whose extent is `source`) into `offset..offset+size`.
pub fn project<'a>(
    source: &BoundingBox,
    size: XY,
    offset: XY,
    polylines: &'a [Vec<XY>],
) -> ProjectedPolylines<'a> {
    ProjectedPolylines {
        polylines,
        projection: Projection::fit(source, size, offset),
    }
}
