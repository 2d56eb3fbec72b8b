// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octant selection relative to a split center.

use glam::{BVec3, Vec3};

bitflags::bitflags! {
    /// One of the eight children of an internal node.
    ///
    /// Each flag marks an axis on which the point lies strictly below the node's
    /// center. The empty set is the `+x +y +z` octant; [`Octant::all`] is `-x -y -z`.
    /// The raw bits double as the child slot index.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Octant: u8 {
        /// `x < center.x`
        const NEG_X = 0b001;
        /// `y < center.y`
        const NEG_Y = 0b010;
        /// `z < center.z`
        const NEG_Z = 0b100;
    }
}

impl Octant {
    /// Every octant, in child slot order.
    pub const ALL: [Self; 8] = [
        Self::from_bits_truncate(0),
        Self::from_bits_truncate(1),
        Self::from_bits_truncate(2),
        Self::from_bits_truncate(3),
        Self::from_bits_truncate(4),
        Self::from_bits_truncate(5),
        Self::from_bits_truncate(6),
        Self::from_bits_truncate(7),
    ];

    /// The octant of `p` relative to `center`.
    ///
    /// Points exactly on a splitting plane go to the upper half on that axis.
    #[inline]
    pub fn of(p: Vec3, center: Vec3) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "BVec3::bitmask only ever sets the low three bits."
        )]
        let bits = p.cmplt(center).bitmask() as u8;
        Self::from_bits_truncate(bits)
    }

    /// Child slot index, `0..8`.
    #[inline]
    pub const fn index(self) -> usize {
        self.bits() as usize
    }

    /// Per-axis mask of the axes on which this octant takes the lower half.
    pub fn lower_mask(self) -> BVec3 {
        BVec3::new(
            self.contains(Self::NEG_X),
            self.contains(Self::NEG_Y),
            self.contains(Self::NEG_Z),
        )
    }
}
