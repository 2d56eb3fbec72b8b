// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_octree --heading-base-level=0

//! Understory Octree: a point octree with nearest-neighbor queries.
//!
//! Understory Octree indexes a cloud of 3D points for proximity queries, the kind
//! needed by simulation, geometry processing and collision broad-phase.
//!
//! - Insert and remove points, and test exact membership.
//! - Query the `k` nearest points to a location, nearest first.
//! - Query up to `k` points strictly within a radius, nearest first.
//!
//! Points are [`glam::Vec3`] values (re-exported as [`Vec3`]).
//!
//! # Example
//!
//! ```rust
//! use understory_octree::{Octree, Vec3};
//!
//! let mut tree = Octree::new(&[
//!     Vec3::ZERO,
//!     Vec3::splat(10.0),
//!     Vec3::ONE,
//!     Vec3::splat(-5.0),
//! ]);
//!
//! assert_eq!(tree.knn(Vec3::ZERO, 2), vec![Vec3::ZERO, Vec3::ONE]);
//!
//! // Radius queries are strict: `(10, 10, 10)` and `(-5, -5, -5)` are too far.
//! assert_eq!(
//!     tree.radius_search(Vec3::ZERO, 10, 2.0),
//!     vec![Vec3::ZERO, Vec3::ONE]
//! );
//!
//! assert!(tree.remove(Vec3::ONE));
//! assert!(!tree.find(Vec3::ONE));
//! assert_eq!(tree.len(), 3);
//! ```
//!
//! ## How it works
//!
//! Each leaf holds at most [`OctreeConfig::bin_threshold`] points (8 by default).
//! Inserting one more splits the leaf into eight children around the center of
//! its bounds, and the points move to the child of their [`Octant`]. Removing the
//! last point below an internal node collapses it back into an empty leaf.
//!
//! KNN and radius queries walk the tree best-first through a [`PriorityQueue`]
//! keyed by squared distance. Nodes are keyed by the distance to their bounds
//! ([`Aabb3D::closest_point`]), which is a lower bound for anything inside them.
//! Points are keyed by their exact distance. The queue therefore hands out points
//! in ascending distance order and never expands a node that cannot contribute.
//!
//! ## Degenerate input
//!
//! Coordinates that the split cannot separate, such as points a few ulps apart,
//! would cascade splits indefinitely. Subdivision stops at
//! [`OctreeConfig::max_depth`], and the crowded leaf keeps its surplus points.
//! [`Octree::insert`] reports this as [`Placement::Overflow`]. Exact duplicates
//! are folded together whenever a leaf splits, so they do not reach the cap.
//!
//! ### Float semantics
//!
//! Points and queries are expected to be finite. Debug builds assert.
//! Membership is exact `f32` equality.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Glam.
//! - `tracing`: spans around builds and queries, and events on subdivision,
//!   merge and overflow.

#![no_std]

extern crate alloc;

pub mod config;
pub mod node;
pub mod octant;
pub mod octree;
pub mod queue;
pub mod types;

mod search;

pub use config::{DEFAULT_BIN_THRESHOLD, DEFAULT_MAX_DEPTH, OctreeConfig};
pub use glam::Vec3;
pub use node::{NodeKind, Placement, Points};
pub use octant::Octant;
pub use octree::Octree;
pub use queue::PriorityQueue;
pub use types::Aabb3D;
