// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_octree::{Octree, Vec3};

use rstar::RTree;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
}

fn gen_points(count: usize, extent: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.next_f32() * extent,
                rng.next_f32() * extent,
                rng.next_f32() * extent,
            )
        })
        .collect()
}

fn to_rstar_points(v: &[Vec3]) -> Vec<[f32; 3]> {
    v.iter().map(|p| p.to_array()).collect()
}

fn bench_knn_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("knn_external_compare");
    let queries = gen_points(500, 100.0, 0xBADC_F00D_1234_5678);
    for &n in &[10_000usize, 80_000] {
        let pts = gen_points(n, 100.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("understory_build_n{n}"), |b| {
            b.iter(|| {
                let tree = Octree::new(black_box(&pts));
                black_box(tree.len());
            });
        });

        group.bench_function(format!("rstar_build_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_points(&pts),
                |points| {
                    let tree = RTree::bulk_load(points);
                    black_box(tree.size());
                },
                BatchSize::LargeInput,
            );
        });

        let octree = Octree::new(&pts);
        let rtree = RTree::bulk_load(to_rstar_points(&pts));
        for &k in &[1usize, 8] {
            group.bench_function(format!("understory_knn_n{n}_k{k}"), |b| {
                b.iter(|| {
                    let mut total = 0;
                    for q in &queries {
                        total += octree.knn(*q, k).len();
                    }
                    black_box(total);
                });
            });

            group.bench_function(format!("rstar_knn_n{n}_k{k}"), |b| {
                b.iter(|| {
                    let mut total = 0;
                    for q in &queries {
                        total += rtree.nearest_neighbor_iter(&q.to_array()).take(k).count();
                    }
                    black_box(total);
                });
            });
        }

        let r = 5.0_f32;
        group.bench_function(format!("understory_radius_n{n}"), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += octree.radius_search(*q, usize::MAX, r).len();
                }
                black_box(total);
            });
        });

        group.bench_function(format!("rstar_radius_n{n}"), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += rtree.locate_within_distance(q.to_array(), r * r).count();
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_knn_external_compare);
criterion_main!(benches);
