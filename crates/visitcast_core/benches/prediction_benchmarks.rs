//! Criterion benchmarks for visitcast_core prediction and sweeps
//!
//! Run with: cargo bench -p visitcast_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use visitcast_core::analysis::{MultiplierRange, SweepDimension, sweep, sweep_all};
use visitcast_core::model::{LibraryParameters, ModelCoefficients, ParameterField};
use visitcast_core::pipeline::Evaluation;
use visitcast_core::prediction::PredictionEngine;

fn engine() -> PredictionEngine {
    PredictionEngine::new(ModelCoefficients::REFERENCE)
}

fn bench_single_prediction(c: &mut Criterion) {
    let engine = engine();
    let params = LibraryParameters::default();

    c.bench_function("predict_reference", |b| {
        b.iter(|| engine.predict(black_box(&params)))
    });
}

fn bench_sweeps(c: &mut Criterion) {
    let engine = engine();
    let params = LibraryParameters::default();
    let multipliers = MultiplierRange::default().values();

    let mut group = c.benchmark_group("sweep");
    for dimension in SweepDimension::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{dimension:?}")),
            &dimension,
            |b, &dimension| {
                b.iter(|| sweep(&engine, black_box(&params), dimension, black_box(&multipliers)))
            },
        );
    }
    group.bench_function("all_dimensions", |b| {
        b.iter(|| sweep_all(&engine, black_box(&params), black_box(&multipliers)))
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("predict_batch");

    for size in [100usize, 1_000, 10_000] {
        let batch: Vec<LibraryParameters> = (0..size)
            .map(|i| {
                LibraryParameters::default()
                    .with(ParameterField::TotalStaff, 1.0 + (i % 50) as f64)
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| engine.predict_batch(black_box(batch)))
        });
    }
    group.finish();
}

fn bench_full_evaluation(c: &mut Criterion) {
    let engine = engine();
    let params = LibraryParameters::default();
    let multipliers = MultiplierRange::default().values();

    c.bench_function("evaluation_compute", |b| {
        b.iter(|| {
            Evaluation::compute(
                &engine,
                black_box(&params),
                SweepDimension::Staff,
                &multipliers,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_single_prediction,
    bench_sweeps,
    bench_batch,
    bench_full_evaluation
);
criterion_main!(benches);
