// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree timing harness.
//!
//! Builds an octree from 80 000 random lattice points in `[0, 100)³`, then times
//! KNN for k = 1 and k = 5, removal of every point and reinsertion.
//! For statistically sound numbers use the criterion benches instead.
//!
//! Run:
//! - `cargo run --release -p understory_demos --example octree_timing`

use std::time::Instant;

use understory_octree::{Octree, Vec3};

const COUNT: usize = 80_000;

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn lattice_point(&mut self) -> Vec3 {
        let mut c = || (self.next_u64() % 100) as f32;
        Vec3::new(c(), c(), c())
    }
}

fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    println!("{label}");
    let start = Instant::now();
    let out = f();
    println!("Took {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);
    out
}

fn main() {
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    let points: Vec<_> = (0..COUNT).map(|_| rng.lattice_point()).collect();

    let mut tree = timed("Generating Octree", || Octree::new(&points));
    println!("{tree}, depth {}", tree.depth());

    for k in [1, 5] {
        let found = timed(&format!("KNN Test: k = {k}"), || {
            (0..COUNT)
                .map(|_| tree.knn(rng.lattice_point(), k).len())
                .sum::<usize>()
        });
        println!("{found} neighbors returned");
    }

    let removed = timed("Deletion Test:", || {
        points.iter().filter(|p| tree.remove(**p)).count()
    });
    println!("{removed} removed, {} left", tree.len());

    timed("Insertion Test:", || tree.extend(points.iter().copied()));
    println!("{tree}");
}
