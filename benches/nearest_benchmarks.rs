use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geokd::{Coord, GeoIndex, IndexConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn random_points(n: usize, seed: u64) -> Vec<(Coord, String)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let lat = rng.gen_range(40.0..41.0);
            let lon = rng.gen_range(-74.5..-73.5);
            (Coord::from_degrees(lat, lon), format!("{} Main St", i))
        })
        .collect()
}

fn benchmark_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    for size in [1_000usize, 100_000, 1_000_000] {
        let points = random_points(size, 1);
        let index = GeoIndex::with_config(IndexConfig::default().with_capacity(size)).unwrap();

        group.bench_with_input(BenchmarkId::new("random", size), &size, |b, _| {
            b.iter(|| index.rebuild(black_box(points.iter().cloned())))
        });
    }

    // Sorted input with heavy duplication on one axis.
    let sorted: Vec<_> = (0..200_000i64)
        .map(|i| (Coord::new(i / 100, i), format!("row {}", i)))
        .collect();
    let index = GeoIndex::new();
    group.bench_function("sorted_duplicates_200k", |b| {
        b.iter(|| index.rebuild(black_box(sorted.iter().cloned())))
    });

    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    for size in [10usize, 1_000, 100_000, 1_000_000] {
        let index = GeoIndex::new();
        index.rebuild(random_points(size, 2));
        let targets: Vec<Coord> = random_points(1_024, 3).into_iter().map(|(c, _)| c).collect();

        group.bench_with_input(BenchmarkId::new("nearest", size), &size, |b, _| {
            let mut i = 0;
            b.iter(|| {
                let target = targets[i % targets.len()];
                i += 1;
                index.query(black_box(target)).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rebuild, benchmark_query);
criterion_main!(benches);
