/*
 * Flock Benchmark
 *
 * Measures the brute-force steering scan and full flock steps at several
 * population sizes, in both update orders.
 */

use boids3d::{Flock, SimulationParams, UpdateMode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn seeded_flock(population: usize, update_mode: UpdateMode) -> Flock {
    let params = SimulationParams {
        population_size: population,
        update_mode,
        seed: Some(0x5EED),
        ..SimulationParams::default()
    };
    Flock::new(params).expect("benchmark parameters are valid")
}

// Benchmark the steering computation for a single boid against the whole flock
fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");

    for num_boids in [100, 300, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let flock = seeded_flock(n, UpdateMode::Snapshot);
            b.iter(|| black_box(flock.steering_for(black_box(0), 1.0)));
        });
    }

    group.finish();
}

// Benchmark whole steps in both update orders
fn bench_step(c: &mut Criterion) {
    for (name, mode) in [
        ("step_snapshot", UpdateMode::Snapshot),
        ("step_interleaved", UpdateMode::Interleaved),
    ] {
        let mut group = c.benchmark_group(name);

        for num_boids in [100, 300, 1000].iter() {
            group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
                let mut flock = seeded_flock(n, mode);
                let mut elapsed = 0.0;
                b.iter(|| {
                    flock.step(elapsed);
                    elapsed += 1.0 / 60.0;
                    black_box(flock.positions().len())
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_steering, bench_step
}

criterion_main!(benches);
