// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_octree::{Octree, OctreeConfig, Vec3};

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
    fn next_below(&mut self, n: u64) -> f32 {
        (self.next_u64() % n) as f32
    }
}

/// Integer lattice points in `[0, 100)³`, duplicates included.
fn gen_lattice_points(count: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Vec3::new(rng.next_below(100), rng.next_below(100), rng.next_below(100)))
        .collect()
}

fn gen_uniform_points(count: usize, extent: f32, seed: u64) -> Vec<Vec3> {
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

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f32) -> Vec<Vec3> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let c = Vec3::new(
            rng.next_f32() * 1000.0,
            rng.next_f32() * 1000.0,
            rng.next_f32() * 1000.0,
        );
        for _ in 0..per_cluster {
            let off = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) - 0.5;
            out.push(c + off * spread);
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_build");
    for &n in &[1_000usize, 10_000, 80_000] {
        let pts = gen_lattice_points(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("lattice_n{n}"), |b| {
            b.iter(|| {
                let tree = Octree::new(black_box(&pts));
                black_box(tree.len());
            });
        });
    }
    let pts = gen_clustered_points(32, 256, 5.0);
    group.throughput(Throughput::Elements(pts.len() as u64));
    for &threshold in &[4usize, 8, 32] {
        group.bench_function(format!("clustered_bin{threshold}"), |b| {
            b.iter(|| {
                let tree = Octree::with_bin_threshold(black_box(&pts), threshold);
                black_box(tree.depth());
            });
        });
    }
    group.finish();
}

fn bench_knn(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_knn");
    let pts = gen_lattice_points(80_000, 0xCAFE_F00D_DEAD_BEEF);
    let tree = Octree::new(&pts);
    let queries = gen_lattice_points(1_000, 0xBADC_F00D_1234_5678);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &k in &[1usize, 5, 32] {
        group.bench_function(format!("lattice_80k_k{k}"), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += tree.knn(*q, k).len();
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

fn bench_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_radius");
    let pts = gen_uniform_points(50_000, 1000.0, 0x1234_5678_9ABC_DEF1);
    let tree = Octree::new(&pts);
    let queries = gen_uniform_points(1_000, 1000.0, 0x0F0F_F0F0_1357_2468);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &r in &[10.0_f32, 50.0] {
        group.bench_function(format!("uniform_50k_r{r}"), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += tree.radius_search(*q, usize::MAX, r).len();
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_churn");
    let pts = gen_lattice_points(20_000, 0xDEAD_BEEF_CAFE_F00D);
    group.throughput(Throughput::Elements(pts.len() as u64));

    group.bench_function("remove_all_20k", |b| {
        b.iter_batched(
            || Octree::new(&pts),
            |mut tree| {
                let mut removed = 0;
                for p in &pts {
                    removed += usize::from(tree.remove(*p));
                }
                black_box(removed);
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("reinsert_all_20k", |b| {
        b.iter_batched(
            || Octree::empty(OctreeConfig::default()),
            |mut tree| {
                tree.extend(pts.iter().copied());
                black_box(tree.len());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_knn, bench_radius, bench_churn);
criterion_main!(benches);
