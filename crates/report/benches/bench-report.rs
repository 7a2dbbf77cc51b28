// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use benchsift_report::{Bandwidth, DensityCurve, Histogram};

fn gen_samples() -> Vec<f64> {
    // deterministic bimodal-ish spread
    (0..2048)
        .map(|nr| 10.0 + ((nr * 37) % 1000) as f64 / 100.0)
        .collect()
}

pub fn report_stats(c: &mut Criterion) {
    let samples = gen_samples();

    c.bench_function("histogram_from_samples", |b| {
        b.iter(|| Histogram::from_samples(black_box(&samples), 50).unwrap())
    });

    c.bench_function("density_evaluate", |b| {
        b.iter(|| {
            DensityCurve::evaluate(black_box(&samples), Bandwidth::Scott, (1.0, 40.0), 200)
                .unwrap()
        })
    });
}

criterion_group!(benches, report_stats);
criterion_main!(benches);
