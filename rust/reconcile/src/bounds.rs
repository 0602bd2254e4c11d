// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes in f64 precision
//!
//! Boxes are always derived: either reduced from a set of points or read from
//! the six extents a CAD bounding-box query returns. Inverted extents
//! (min > max) are accepted as-is and flow through the same reductions.
//!
//! # Non-finite input
//! Reduction uses `f64::min` / `f64::max`, so NaN is not propagated the way
//! infinities are: a NaN coordinate in a later point is ignored, and a NaN in
//! the seed point is replaced by the first number seen on that axis. The
//! result is deterministic for a given input order but carries no meaning.

use crate::error::{Error, Result};
use nalgebra::Point3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisAlignedBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Minimum Z coordinate
    pub min_z: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
    /// Maximum Z coordinate
    pub max_z: f64,
}

impl AxisAlignedBox {
    /// Create a box from its minimum and maximum corners
    #[inline]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min_x: min.x,
            min_y: min.y,
            min_z: min.z,
            max_x: max.x,
            max_y: max.y,
            max_z: max.z,
        }
    }

    /// Degenerate box covering a single point
    #[inline]
    pub fn from_point(point: Point3<f64>) -> Self {
        Self::new(point, point)
    }

    /// Create a box from extents in CAD order:
    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`
    #[inline]
    pub fn from_extents(extents: [f64; 6]) -> Self {
        let [min_x, min_y, min_z, max_x, max_y, max_z] = extents;
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Like [`from_extents`](Self::from_extents), for raw arrays of unknown length
    pub fn from_slice(extents: &[f64]) -> Result<Self> {
        let extents: [f64; 6] = extents
            .try_into()
            .map_err(|_| Error::InvalidBoundingBox(extents.len()))?;
        Ok(Self::from_extents(extents))
    }

    /// Reduce a non-empty point sequence to the box that bounds it
    pub fn from_points<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: std::borrow::Borrow<Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next().ok_or(Error::EmptyPointSet)?;
        let mut bounds = Self::from_point(*first.borrow());
        for point in iter {
            bounds.expand(point.borrow());
        }
        Ok(bounds)
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand(&mut self, point: &Point3<f64>) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.min_z = self.min_z.min(point.z);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
        self.max_z = self.max_z.max(point.z);
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Point3<f64> {
        Point3::new(self.min_x, self.min_y, self.min_z)
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Point3<f64> {
        Point3::new(self.max_x, self.max_y, self.max_z)
    }

    /// Extents in CAD order, the inverse of [`from_extents`](Self::from_extents)
    #[inline]
    pub fn to_extents(&self) -> [f64; 6] {
        [
            self.min_x, self.min_y, self.min_z, self.max_x, self.max_y, self.max_z,
        ]
    }

    /// True if any axis has min > max
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }

    /// All eight corners.
    ///
    /// Order is fixed with X varying slowest and Z fastest:
    /// (min,min,min), (min,min,max), (min,max,min), (min,max,max),
    /// (max,min,min), (max,min,max), (max,max,min), (max,max,max).
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (x0, y0, z0) = (self.min_x, self.min_y, self.min_z);
        let (x1, y1, z1) = (self.max_x, self.max_y, self.max_z);
        [
            Point3::new(x0, y0, z0),
            Point3::new(x0, y0, z1),
            Point3::new(x0, y1, z0),
            Point3::new(x0, y1, z1),
            Point3::new(x1, y0, z0),
            Point3::new(x1, y0, z1),
            Point3::new(x1, y1, z0),
            Point3::new(x1, y1, z1),
        ]
    }
}
