//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use noel::emitter::Emitter;
use noel::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn started_scene(tree_particles: usize) -> Scene {
    let config = Config {
        tree_particles,
        ..Config::default()
    };
    let mut scene = Scene::with_seed(config, Viewport::new(1280.0, 720.0), 8, 7);
    scene.start();
    scene
}

fn bench_tree_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_tick");

    for count in [500, 1500, 5000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut scene = started_scene(count);
            b.iter(|| black_box(scene.tick(FRAME)))
        });
    }

    group.finish();
}

fn bench_photo_tick(c: &mut Criterion) {
    c.bench_function("photo_tick", |b| {
        let mut scene = started_scene(1500);
        scene.click();
        for _ in 0..40 {
            scene.tick(FRAME);
        }
        b.iter(|| black_box(scene.tick(FRAME)))
    });
}

fn bench_emitters(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let config = Config::default();
    let viewport = Viewport::default();

    group.bench_function("tree_1500", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::with_capacity(1500);
        b.iter(|| {
            out.clear();
            Emitter::Tree { count: 1500 }.emit(&viewport, &config, &mut rng, &mut out);
            black_box(out.len())
        })
    });

    group.bench_function("heart_10", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::with_capacity(10);
        b.iter(|| {
            out.clear();
            Emitter::Heart {
                count: 10,
                center: Vec3::ZERO,
            }
            .emit(&viewport, &config, &mut rng, &mut out);
            black_box(out.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tree_tick, bench_photo_tick, bench_emitters);
criterion_main!(benches);
