// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use benchsift_parser::{parse_lines, Layout};

fn gen_log(layout: &Layout) -> Vec<String> {
    (0..layout.line_count())
        .map(|nr| match nr % 38 {
            0 => "== section ==".to_string(),
            1 => "   runs: 35".to_string(),
            37 => String::new(),
            row => format!("- pass {:02}: {}.{:03}ms", row, 800 + row, nr % 1000),
        })
        .collect()
}

pub fn parser_process(c: &mut Criterion) {
    let layout = Layout::reference();
    let lines = gen_log(&layout);

    c.bench_function("parse_reference_layout", |b| {
        b.iter(|| parse_lines(black_box(&lines), black_box(&layout)).unwrap())
    });
}

criterion_group!(benches, parser_process);
criterion_main!(benches);
