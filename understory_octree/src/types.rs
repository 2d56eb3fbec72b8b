// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::fmt;

use glam::Vec3;

use crate::octant::Octant;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3D {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb3D {
    /// Create a new AABB from min/max corners.
    ///
    /// The corners are taken as given; callers keep `min <= max` on every axis.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A degenerate box around a single point.
    pub const fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// The tight box enclosing `points`, seeded from the first one.
    ///
    /// Returns `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = Self::from_point(it.next()?);
        Some(it.fold(first, |acc, p| acc.expand(p)))
    }

    /// Grow the box just enough to contain `p`.
    #[must_use]
    pub fn expand(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint of the box; the split point used for subdivision.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    /// Extent along each axis (`max - min`).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether the point lies inside or on the boundary of the box.
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The point on or in the box closest to `query`.
    ///
    /// Each coordinate of `query` is clamped into `[min, max]` on its axis, so the
    /// distance to the result never exceeds the distance to anything inside the box.
    pub fn closest_point(&self, query: Vec3) -> Vec3 {
        // Not `Vec3::clamp`: that asserts `min <= max`, which a caller-built box may break.
        query.max(self.min).min(self.max)
    }

    /// Squared distance from `query` to the box; zero when `query` is inside.
    pub fn distance_squared(&self, query: Vec3) -> f32 {
        (self.closest_point(query) - query).length_squared()
    }

    /// The child box selected by `octant` when this box is split at `center`.
    ///
    /// A set bit takes the `[min, center]` half on that axis, a clear bit the
    /// `[center, max]` half. The eight results tile the box exactly.
    pub fn octant_box(&self, octant: Octant, center: Vec3) -> Self {
        let lower = octant.lower_mask();
        Self {
            min: Vec3::select(lower, self.min, center),
            max: Vec3::select(lower, center, self.max),
        }
    }
}

impl fmt::Display for Aabb3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min: {}, max: {}", self.min, self.max)
    }
}
