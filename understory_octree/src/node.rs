// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition unit of the octree.
//!
//! A [`Node`] is either a leaf holding a short list of points or an internal node
//! holding exactly eight children, one per [`Octant`] of its split center.
//! Every point operation dispatches on the octant of the point and recurses into
//! a single child.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;

use glam::Vec3;

use crate::config::OctreeConfig;
use crate::octant::Octant;
use crate::types::Aabb3D;

/// Whether a node currently stores points or children.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Holds points directly.
    Leaf,
    /// Holds eight children.
    Internal,
}

/// Where an inserted point ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The point landed in a leaf within the subdivision threshold.
    Stored,
    /// The point landed in a leaf at the depth cap that already holds more points
    /// than the threshold allows. The point is stored, the leaf just cannot split.
    Overflow {
        /// Depth of the overflowing leaf (the root is depth `0`).
        depth: usize,
    },
}

impl Placement {
    /// True for [`Placement::Overflow`].
    pub const fn is_overflow(self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    Leaf(Vec<Vec3>),
    Internal {
        children: Box<[Node; 8]>,
        center: Vec3,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    /// Memoized bounds. `None` means stale; it is refilled on the next read.
    bounds: Cell<Option<Aabb3D>>,
    pub(crate) kind: Kind,
}

impl Node {
    pub(crate) const fn empty() -> Self {
        Self {
            bounds: Cell::new(None),
            kind: Kind::Leaf(Vec::new()),
        }
    }

    /// An empty leaf whose bounds are known up front.
    pub(crate) const fn stamped(bounds: Aabb3D) -> Self {
        Self {
            bounds: Cell::new(Some(bounds)),
            kind: Kind::Leaf(Vec::new()),
        }
    }

    pub(crate) const fn kind(&self) -> NodeKind {
        match self.kind {
            Kind::Leaf(_) => NodeKind::Leaf,
            Kind::Internal { .. } => NodeKind::Internal,
        }
    }

    /// Number of points stored in this node and its descendants.
    pub(crate) fn len(&self) -> usize {
        match &self.kind {
            Kind::Leaf(points) => points.len(),
            Kind::Internal { children, .. } => children.iter().map(Self::len).sum(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match &self.kind {
            Kind::Leaf(points) => points.is_empty(),
            Kind::Internal { children, .. } => children.iter().all(Self::is_empty),
        }
    }

    /// Height of the subtree; a leaf has depth `0`.
    pub(crate) fn depth(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 0,
            Kind::Internal { children, .. } => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }

    /// Bounds of everything stored below this node, recomputed if stale.
    ///
    /// `None` for an empty subtree that was never stamped.
    pub(crate) fn bounds(&self) -> Option<Aabb3D> {
        match self.bounds.get() {
            Some(b) => Some(b),
            None => self.generate_bounds(),
        }
    }

    /// Recompute and memoize the bounds.
    ///
    /// A leaf takes the tight box of its points. An internal node takes the union
    /// of its children's bounds.
    pub(crate) fn generate_bounds(&self) -> Option<Aabb3D> {
        let b = match &self.kind {
            Kind::Leaf(points) => Aabb3D::from_points(points.iter().copied()),
            Kind::Internal { children, .. } => children
                .iter()
                .filter_map(Self::bounds)
                .reduce(Aabb3D::union),
        };
        self.bounds.set(b);
        b
    }

    fn invalidate(&self) {
        self.bounds.set(None);
    }

    /// Grow a memoized box to cover `p`. A stale cache stays stale.
    fn cover(&self, p: Vec3) {
        if let Some(b) = self.bounds.get() {
            self.bounds.set(Some(b.expand(p)));
        }
    }

    pub(crate) fn find(&self, p: Vec3) -> bool {
        match &self.kind {
            Kind::Leaf(points) => points.contains(&p),
            Kind::Internal { children, center } => children[Octant::of(p, *center).index()].find(p),
        }
    }

    /// Insert `p` into the leaf its octant path leads to, splitting that leaf if it
    /// grows past the threshold.
    ///
    /// Every box on the path grows to cover `p`, so a leaf split is centered on
    /// the box it was stamped with rather than on its points.
    pub(crate) fn insert(&mut self, p: Vec3, config: &OctreeConfig, depth: usize) -> Placement {
        self.cover(p);
        match &mut self.kind {
            Kind::Leaf(points) => {
                points.push(p);
                self.subdivide(config, depth, false);
                self.placement_of(p, config, depth)
            }
            Kind::Internal { children, center } => {
                children[Octant::of(p, *center).index()].insert(p, config, depth + 1)
            }
        }
    }

    /// Remove the first point equal to `p`. Every internal node on the way back up
    /// re-checks whether it can merge.
    pub(crate) fn remove(&mut self, p: Vec3) -> bool {
        let removed = match &mut self.kind {
            Kind::Leaf(points) => match points.iter().position(|q| *q == p) {
                Some(i) => {
                    points.remove(i);
                    true
                }
                None => false,
            },
            Kind::Internal { children, center } => {
                let removed = children[Octant::of(p, *center).index()].remove(p);
                self.merge();
                removed
            }
        };
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Split a leaf holding more than `config.bin_threshold` points into eight
    /// children, then split those children as needed.
    ///
    /// `regenerate_bounds` drops the memoized box first so the split is centered
    /// on the points' tight box. Otherwise the memoized box is used as is, and it
    /// is only recomputed when stale. Children get their octant box stamped.
    /// Points that land on an exact duplicate already in the same child are
    /// dropped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, level = "trace", name = "octree::subdivide")
    )]
    pub(crate) fn subdivide(
        &mut self,
        config: &OctreeConfig,
        depth: usize,
        regenerate_bounds: bool,
    ) {
        let len = match &self.kind {
            Kind::Leaf(points) => points.len(),
            Kind::Internal { .. } => return,
        };
        if !config.should_split(len, depth) {
            return;
        }
        if regenerate_bounds {
            self.invalidate();
        }
        let Some(bounds) = self.bounds() else {
            return;
        };
        let center = bounds.center();
        let points = match &mut self.kind {
            Kind::Leaf(points) => core::mem::take(points),
            Kind::Internal { .. } => return,
        };

        let mut children: Box<[Self; 8]> = Box::new(
            Octant::ALL.map(|octant| Self::stamped(bounds.octant_box(octant, center))),
        );
        for p in points {
            if let Kind::Leaf(bucket) = &mut children[Octant::of(p, center).index()].kind
                && !bucket.contains(&p)
            {
                bucket.push(p);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(depth, points = len, "subdivide");

        for child in children.iter_mut() {
            child.subdivide(config, depth + 1, false);
        }
        self.kind = Kind::Internal { children, center };
    }

    /// Collapse an internal node whose whole subtree is empty into an empty leaf.
    ///
    /// Partially filled subtrees are left alone.
    pub(crate) fn merge(&mut self) {
        if matches!(self.kind, Kind::Leaf(_)) || !self.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(depth = self.depth(), "merge");
        self.kind = Kind::Leaf(Vec::new());
        self.invalidate();
    }

    fn placement_of(&self, p: Vec3, config: &OctreeConfig, depth: usize) -> Placement {
        match &self.kind {
            Kind::Leaf(points) if points.len() > config.bin_threshold => {
                #[cfg(feature = "tracing")]
                tracing::warn!(depth, points = points.len(), "leaf overflow at depth cap");
                Placement::Overflow { depth }
            }
            Kind::Leaf(_) => Placement::Stored,
            Kind::Internal { children, center } => {
                children[Octant::of(p, *center).index()].placement_of(p, config, depth + 1)
            }
        }
    }
}

/// Iterator over every point stored in an [`Octree`](crate::Octree).
///
/// Points are yielded leaf by leaf in child slot order, each leaf in insertion order.
#[derive(Debug)]
pub struct Points<'a> {
    stack: Vec<&'a Node>,
    current: core::slice::Iter<'a, Vec3>,
}

impl<'a> Points<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        let mut stack = Vec::new();
        stack.push(root);
        Self {
            stack,
            current: [].iter(),
        }
    }
}

impl Iterator for Points<'_> {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        loop {
            if let Some(p) = self.current.next() {
                return Some(*p);
            }
            match &self.stack.pop()?.kind {
                Kind::Leaf(points) => self.current = points.iter(),
                Kind::Internal { children, .. } => self.stack.extend(children.iter().rev()),
            }
        }
    }
}
