use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use impurity_pca::{
    Configuration, DimensionCounter, LinearMixtureModel, SimulationConfig, SweepEngine,
    TrialRunner, ZeroVariancePolicy,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Generation alone, at the preset sample size.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("LinearMixtureModel_generate");

    for &(num_latents, num_scores, sparsity) in [(22, 22, 0.0), (22, 22, 0.95), (10, 100, 0.0)].iter() {
        let config = Configuration::new(300, num_latents, num_scores, sparsity, 1).unwrap();
        let model = LinearMixtureModel::new(&config);
        group.throughput(Throughput::Elements((300 * num_scores) as u64));
        group.bench_with_input(
            BenchmarkId::new("generate", format!("L{}xS{}@{}", num_latents, num_scores, sparsity)),
            &model,
            |b, model| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                b.iter(|| model.generate(&mut rng));
            },
        );
    }
    group.finish();
}

// Standardize + eigenvalues + both criteria.
fn bench_count_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("DimensionCounter_count");
    let counter = DimensionCounter::new(ZeroVariancePolicy::Error);

    for &num_scores in [22, 40, 100].iter() {
        let config = Configuration::new(300, 10, num_scores, 0.0, 1).unwrap();
        let dataset = LinearMixtureModel::new(&config).generate(&mut ChaCha8Rng::seed_from_u64(7));
        group.bench_with_input(
            BenchmarkId::new("count_dimensions", format!("300x{}", num_scores)),
            &dataset.scores,
            |b, scores| b.iter(|| counter.count_dimensions(scores).unwrap()),
        );
    }
    group.finish();
}

// One configuration's worth of replications.
fn bench_trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("TrialRunner_run");
    group.sample_size(10);
    let runner = TrialRunner::new(DimensionCounter::new(ZeroVariancePolicy::Error));
    let config = Configuration::new(300, 22, 22, 0.95, 50).unwrap();
    group.bench_function("run_50_replications", |b| {
        b.iter(|| runner.run(&config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap())
    });
    group.finish();
}

// A reduced preset-1 sweep, to compare thread counts.
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("SweepEngine_run_sweep");
    group.sample_size(10);
    let num_latents_values: Vec<usize> = (1..=22).collect();

    for &num_threads in [1usize, 4].iter() {
        let engine = SweepEngine::new(SimulationConfig {
            seed: Some(2025),
            num_threads: Some(num_threads),
            zero_variance_policy: ZeroVariancePolicy::Error,
        });
        group.bench_with_input(
            BenchmarkId::new("preset1_10_reps", format!("{}_threads", num_threads)),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .run_sweep(&[300], &num_latents_values, &[22], &[0.0, 0.95], 10)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_count_dimensions, bench_trial, bench_sweep);
criterion_main!(benches);
