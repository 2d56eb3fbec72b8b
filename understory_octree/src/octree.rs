// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Octree` API.

use alloc::vec::Vec;
use core::fmt;

use glam::Vec3;

use crate::config::OctreeConfig;
use crate::node::{Node, NodeKind, Placement, Points};
use crate::search::best_first;
use crate::types::Aabb3D;

/// A point octree supporting exact membership, k-nearest-neighbor and radius queries.
///
/// Points are kept in leaves of at most [`OctreeConfig::bin_threshold`] points.
/// A leaf that grows past that splits into eight children around the center of
/// its bounds. An internal node whose whole subtree becomes empty collapses back
/// into an empty leaf.
///
/// Bounds are memoized per node and refreshed lazily after mutation, so the tree
/// is not `Sync`. It is meant for single-threaded use.
pub struct Octree {
    root: Node,
    config: OctreeConfig,
}

impl Octree {
    /// Build an octree over `points` with the default [`OctreeConfig`].
    pub fn new(points: &[Vec3]) -> Self {
        Self::with_config(points, OctreeConfig::default())
    }

    /// Build an octree over `points` whose leaves split above `bin_threshold` points.
    pub fn with_bin_threshold(points: &[Vec3], bin_threshold: usize) -> Self {
        Self::with_config(points, OctreeConfig::new().with_bin_threshold(bin_threshold))
    }

    /// Build an octree over `points` with an explicit policy.
    ///
    /// The root starts out with the tight box of all points and then receives the
    /// points one at a time, in order, through [`Octree::insert`]. The first root
    /// split is centered on that box.
    ///
    /// Overflow at the depth cap is not reported here. Build with
    /// [`Octree::empty`] and [`Octree::insert_all`] to count it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(points = points.len()), name = "octree::build")
    )]
    pub fn with_config(points: &[Vec3], config: OctreeConfig) -> Self {
        let root = match Aabb3D::from_points(points.iter().copied()) {
            Some(bounds) => Node::stamped(bounds),
            None => Node::empty(),
        };
        let mut tree = Self { root, config };
        // Each overflowing point still emits its own `tracing` warning.
        let _ = tree.insert_all(points.iter().copied());
        tree
    }

    /// An empty octree with the given policy.
    pub const fn empty(config: OctreeConfig) -> Self {
        Self {
            root: Node::empty(),
            config,
        }
    }

    /// The subdivision policy.
    pub const fn config(&self) -> OctreeConfig {
        self.config
    }

    /// Insert a point. Duplicates are allowed.
    ///
    /// Reports [`Placement::Overflow`] when the point landed in a leaf at the depth
    /// cap that already exceeds the threshold.
    pub fn insert(&mut self, point: Vec3) -> Placement {
        debug_assert!(point.is_finite(), "octree points must be finite");
        self.root.insert(point, &self.config, 0)
    }

    /// Insert every point in order. Returns how many of them reported
    /// [`Placement::Overflow`].
    pub fn insert_all<I: IntoIterator<Item = Vec3>>(&mut self, points: I) -> usize {
        points
            .into_iter()
            .filter(|&p| self.insert(p).is_overflow())
            .count()
    }

    /// Remove one point equal to `point`. Returns `false` if there was none.
    pub fn remove(&mut self, point: Vec3) -> bool {
        self.root.remove(point)
    }

    /// Whether a point exactly equal to `point` is stored.
    pub fn find(&self, point: Vec3) -> bool {
        self.root.find(point)
    }

    /// The `k` stored points closest to `query`, nearest first.
    ///
    /// Returns fewer than `k` points only if the tree holds fewer.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), level = "trace", name = "octree::knn")
    )]
    pub fn knn(&self, query: Vec3, k: usize) -> Vec<Vec3> {
        debug_assert!(query.is_finite(), "query must be finite");
        best_first(&self.root, query, k, None)
    }

    /// Up to `k` stored points strictly closer than `max_distance` to `query`,
    /// nearest first.
    ///
    /// A point at exactly `max_distance` is excluded. A negative or NaN radius
    /// matches nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), level = "trace", name = "octree::radius_search")
    )]
    pub fn radius_search(&self, query: Vec3, k: usize, max_distance: f32) -> Vec<Vec3> {
        debug_assert!(query.is_finite(), "query must be finite");
        if max_distance.is_nan() || max_distance < 0.0 {
            return Vec::new();
        }
        best_first(&self.root, query, k, Some(max_distance * max_distance))
    }

    /// Number of stored points, duplicates included.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Bounds of the stored points. `None` when empty.
    ///
    /// This is conservative: boxes stamped by a split can be larger than the points
    /// they hold until those nodes next change.
    pub fn bounds(&self) -> Option<Aabb3D> {
        self.root.bounds()
    }

    /// Height of the tree; `0` while the root is still a leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Whether the root currently holds points or children.
    pub const fn root_kind(&self) -> NodeKind {
        self.root.kind()
    }

    /// Iterate over every stored point.
    pub fn iter(&self) -> Points<'_> {
        Points::new(&self.root)
    }

    /// Drop every point, keeping the policy.
    pub fn clear(&mut self) {
        self.root = Node::empty();
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::empty(OctreeConfig::default())
    }
}

impl<'a> IntoIterator for &'a Octree {
    type Item = Vec3;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Vec3> for Octree {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let points: Vec<_> = iter.into_iter().collect();
        Self::new(&points)
    }
}

/// Overflow is dropped; use [`Octree::insert_all`] to observe it.
impl Extend<Vec3> for Octree {
    fn extend<I: IntoIterator<Item = Vec3>>(&mut self, iter: I) {
        let _ = self.insert_all(iter);
    }
}

impl fmt::Display for Octree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            Some(b) => write!(f, "Octree: count {}, bounds {b}", self.len()),
            None => write!(f, "Octree: count {}, empty", self.len()),
        }
    }
}

impl fmt::Debug for Octree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("config", &self.config)
            .field("len", &self.len())
            .field("depth", &self.depth())
            .field("root_kind", &self.root_kind())
            .finish_non_exhaustive()
    }
}
