// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree basics.
//!
//! Build a small octree, run nearest-neighbor and radius queries, then remove
//! points until the root collapses.
//!
//! Run:
//! - `cargo run -p understory_demos --example octree_basics`

use understory_octree::{NodeKind, Octree, OctreeConfig, Vec3};

fn main() {
    let points = [
        Vec3::ZERO,
        Vec3::splat(10.0),
        Vec3::ONE,
        Vec3::splat(-5.0),
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-1.0, 2.0, 0.5),
        Vec3::new(7.0, -2.0, 3.0),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(2.0, 2.0, 2.0),
    ];
    let mut tree = Octree::new(&points);
    println!("{tree}");
    println!("{tree:?}");
    assert_eq!(tree.root_kind(), NodeKind::Internal, "nine points split the root");

    let nearest = tree.knn(Vec3::ZERO, 3);
    println!("3 nearest to origin: {nearest:?}");

    // (3, 4, 0) sits exactly 5 away and is excluded.
    let within = tree.radius_search(Vec3::ZERO, 10, 5.0);
    println!("strictly within 5 of origin: {within:?}");

    assert!(!tree.remove(Vec3::splat(99.0)));
    for p in points {
        assert!(tree.remove(p));
    }
    println!("after removing everything: {tree}");
    assert_eq!(tree.root_kind(), NodeKind::Leaf);

    // A tight depth cap makes inseparable points overflow instead of splitting.
    let mut capped = Octree::empty(OctreeConfig::new().with_bin_threshold(1).with_max_depth(2));
    let _ = capped.insert(Vec3::ONE);
    let placement = capped.insert(Vec3::new(1.0 + f32::EPSILON, 1.0, 1.0));
    println!("adjacent floats under a depth cap: {placement:?}");
}
