use crate::common::{configure_criterion, sample_record};
use criterion::{criterion_group, BenchmarkId, Criterion};
use error_record::ErrorRecord;
use std::hint::black_box;

/// Full (round-trippable) form, scaled by query parameter count
pub fn bench_full_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization/full");

    for params in [0usize, 8, 64] {
        let record = sample_record(params);
        let json = record.to_json().unwrap();

        group.bench_with_input(BenchmarkId::new("to_json", params), &record, |b, record| {
            b.iter(|| black_box(record.to_json()))
        });

        group.bench_with_input(BenchmarkId::new("from_json", params), &json, |b, json| {
            b.iter(|| black_box(ErrorRecord::from_json(json)))
        });
    }

    group.finish();
}

/// Detailed (display) form with its last-value flattening
pub fn bench_detailed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization/detailed");

    for params in [0usize, 8, 64] {
        let record = sample_record(params);
        group.bench_with_input(BenchmarkId::from_parameter(params), &record, |b, record| {
            b.iter(|| black_box(record.to_detailed_json()))
        });
    }

    group.finish();
}

/// Clone cost: every request collection is deep-copied
pub fn bench_clone(c: &mut Criterion) {
    let record = sample_record(64);
    c.bench_function("serialization/clone_64", |b| b.iter(|| black_box(record.clone())));
}

criterion_group! {
    name = serialization_benches;
    config = configure_criterion();
    targets =
        bench_full_form,
        bench_detailed_form,
        bench_clone,
}
