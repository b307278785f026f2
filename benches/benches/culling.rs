// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use landmark_cull::{DEFAULT_BUFFER_RATIO, Placed, ViewportBounds, compute_visible};
use landmark_disclosure::{Disclosed, compute_disclosed};
use landmark_view::{CullingAdapter, LandmarkLayer, MapCamera};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Clone)]
struct Mark {
    at: Option<Point>,
    tier: f64,
}

impl Placed for Mark {
    fn coordinate(&self) -> Option<Point> {
        self.at
    }
}

impl Disclosed for Mark {
    fn reveal_threshold(&self) -> Option<f64> {
        Some(self.tier)
    }
}

/// Marks scattered over the 2600x2600 canvas; every 50th one is unplaced.
fn marks(n: usize, seed: u64) -> Vec<Mark> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|i| {
            let at = Point::new(rng.next_f64() * 2600.0, rng.next_f64() * 2600.0);
            let tier = [-1.0, 0.0, 1.0][i % 3];
            Mark {
                at: (i % 50 != 0).then_some(at),
                tier,
            }
        })
        .collect()
}

fn bench_compute_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_visible");
    let view = ViewportBounds::new(1600.0, 1000.0, 1700.0, 900.0);
    for &n in &[200_usize, 1_000, 10_000] {
        let data = marks(n, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| {
                let out = compute_visible(black_box(data), Some(view), DEFAULT_BUFFER_RATIO);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

fn bench_compute_disclosed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_disclosed");
    for &n in &[200_usize, 1_000, 10_000] {
        let data = marks(n, 11);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| black_box(compute_disclosed(black_box(data), Some(0.0)).len()));
        });
    }
    group.finish();
}

fn bench_layer_compose(c: &mut Criterion) {
    let data = marks(200, 3);
    let view = Some(ViewportBounds::new(1600.0, 1000.0, 1700.0, 900.0));
    let mut layer = LandmarkLayer::default();
    let mut zoom = 0.0;
    c.bench_function("layer_compose_200_zoom_changes", |b| {
        b.iter(|| {
            // Alternate zoom so disclosure recomputes every iteration.
            zoom = if zoom == 0.0 { 1.0 } else { 0.0 };
            black_box(layer.compose(&data, 1, Some(zoom), view).len())
        });
    });
}

fn bench_adapter_settle(c: &mut Criterion) {
    let mut camera = MapCamera::default();
    camera.set_view_size(Size::new(1024.0, 768.0));
    let mut adapter = CullingAdapter::new(marks(200, 5));
    adapter.mount(&mut camera);
    let mut now = 0_u64;
    let mut dx = 40.0;
    c.bench_function("adapter_pan_and_settle_200", |b| {
        b.iter(|| {
            dx = -dx;
            camera.pan_by(Vec2::new(dx, 0.0));
            for sub in camera.drain_events() {
                adapter.notify(sub, now);
            }
            now += 100;
            black_box(adapter.tick(&camera, now))
        });
    });
}

criterion_group!(
    benches,
    bench_compute_visible,
    bench_compute_disclosed,
    bench_layer_compose,
    bench_adapter_settle
);
criterion_main!(benches);
