//! Benchmarks for batch evolution across populations.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use qtevo::analysis::{tajimas_d, take_sample};
use qtevo::simulation::{evolve_qtraits, EvolveParams, Population, SimulationBuilder};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn params() -> EvolveParams {
    SimulationBuilder::new()
        .population_size(500)
        .generations(1)
        .mutation_rates(0.01, 0.001)
        .recombination_rate(0.5)
        .build()
        .unwrap()
        .params()
        .clone()
}

fn bench_evolve_qtraits(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_qtraits");
    let params = params();
    let generations = 20;

    for &count in &[1usize, 4] {
        group.throughput(Throughput::Elements((count * generations) as u64));
        group.bench_with_input(BenchmarkId::new("populations", count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let pops: Vec<Population> = (0..count).map(|i| Population::new(format!("pop{i}"), 500)).collect();
                    (pops, Xoshiro256PlusPlus::seed_from_u64(42))
                },
                |(mut pops, mut rng)| {
                    evolve_qtraits(&mut rng, &mut pops, &vec![500; generations], &params, None).unwrap();
                    black_box(pops)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut sim = SimulationBuilder::new()
        .population_size(500)
        .generations(200)
        .mutation_rates(0.05, 0.0)
        .recombination_rate(1.0)
        .seed(1)
        .build()
        .unwrap();
    sim.run(None).unwrap();
    let pop = &sim.populations()[0];

    c.bench_function("take_sample_tajimas_d", |b| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        b.iter(|| {
            let sample = take_sample(&mut rng, pop, black_box(50)).unwrap();
            black_box(tajimas_d(&sample))
        })
    });
}

criterion_group!(benches, bench_evolve_qtraits, bench_sampling);
criterion_main!(benches);
