use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ridetime::{aggregate_track, Cubic, ModelConfig, RootSolver, Track, TrackPoint};

/// Benchmarks for the speed solve and whole-track aggregation

fn bench_root_solver(c: &mut Criterion) {
    let solver = RootSolver::default();
    let mut group = c.benchmark_group("Root Solver");

    for (name, cubic) in [
        ("flat", Cubic::new(0.30625, 6.272, -114.0)),
        ("climb", Cubic::new(0.30625, 160.0, -114.0)),
        ("descent", Cubic::new(0.30625, -700.0, -114.0)),
    ] {
        group.bench_with_input(BenchmarkId::new("largest_root", name), &cubic, |b, cubic| {
            b.iter(|| solver.largest_root(black_box(cubic)));
        });
    }

    group.finish();
}

fn create_rolling_track(points: usize) -> Track {
    Track::from_points(
        (0..points)
            .map(|i| {
                let x = i as f64;
                TrackPoint::new(0.0, x * 50.0, 40.0 * (x / 25.0).sin())
            })
            .collect(),
    )
}

fn planar(a: &TrackPoint, b: &TrackPoint) -> f64 {
    (b.longitude - a.longitude).abs()
}

fn bench_track_aggregation(c: &mut Criterion) {
    let config = ModelConfig::detailed();
    let mut group = c.benchmark_group("Track Aggregation");

    for &size in &[100, 1_000, 10_000] {
        let track = create_rolling_track(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("aggregate_track", size), &track, |b, track| {
            b.iter(|| aggregate_track(&config, black_box(track), planar));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_root_solver, bench_track_aggregation);
criterion_main!(benches);
