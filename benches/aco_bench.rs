//! Criterion benchmarks for the ACO engine.
//!
//! Cities are drawn uniformly from a 1000×1000 square with a fixed seed so
//! every run measures the same instances.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_aco::aco::{AcoConfig, AcoRunner, City, DistanceModel, PheromoneModel, TourConstructor};
use u_aco::random::create_rng;

fn random_cities(n: usize, seed: u64) -> Vec<City> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| City::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_construct");

    for &n in &[20usize, 100, 200] {
        let distances = DistanceModel::new(&random_cities(n, 42)).unwrap();
        let pheromone = PheromoneModel::new(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let constructor = TourConstructor::new(&distances, &pheromone, 1.0, 2.0).unwrap();
            let mut rng = create_rng(7);
            b.iter(|| {
                let tour = constructor.construct(0, &mut rng).unwrap();
                black_box(tour)
            })
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_solve");
    group.sample_size(10);

    for (n, ants, iters) in [(20usize, 20usize, 20usize), (50, 30, 20), (100, 50, 10)] {
        let cities = random_cities(n, 42);
        let config = AcoConfig::default()
            .with_num_ants(ants)
            .with_iterations(iters)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_a{}_i{}", n, ants, iters), n),
            &(cities, config),
            |b, (cities, config)| {
                b.iter(|| {
                    let result = AcoRunner::run(black_box(cities), black_box(config)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_construct, bench_solve);
criterion_main!(benches);
