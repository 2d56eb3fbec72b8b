// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for [`Octree`](crate::Octree).

/// Default number of points a leaf may hold before it subdivides.
pub const DEFAULT_BIN_THRESHOLD: usize = 8;

/// Default depth below which leaves stop subdividing.
///
/// Each level halves the cell, so past roughly the `f32` mantissa width further
/// splits cannot separate points any more.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Subdivision policy of an [`Octree`](crate::Octree).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
    /// A leaf holding more than this many points is split into eight children.
    pub bin_threshold: usize,
    /// Leaves at this depth (the root is depth `0`) never split; surplus points
    /// stay in them as overflow.
    pub max_depth: usize,
}

impl OctreeConfig {
    /// The default policy: threshold [`DEFAULT_BIN_THRESHOLD`], depth cap [`DEFAULT_MAX_DEPTH`].
    pub const fn new() -> Self {
        Self {
            bin_threshold: DEFAULT_BIN_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the subdivision threshold.
    #[must_use]
    pub const fn with_bin_threshold(mut self, bin_threshold: usize) -> Self {
        self.bin_threshold = bin_threshold;
        self
    }

    /// Replace the depth cap.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a leaf at `depth` holding `len` points must split.
    pub(crate) const fn should_split(&self, len: usize, depth: usize) -> bool {
        len > self.bin_threshold && depth < self.max_depth
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
