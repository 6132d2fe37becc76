//! Benchmarks for mini-notation parsing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strudel_helpers::notation::parse_sequence;

pub fn bench_notation(c: &mut Criterion) {
    let mut group = c.benchmark_group("notation/parse");

    let inputs: &[(&str, &str)] = &[
        ("flat", "0 2 4 5 7 9 11 12"),
        ("nested", "0 [2 [4 5]] <7 9>*2 ~ [11 12 ~ 14]"),
        ("names", "c3 eb3 g3 bb3 c4 eb4 g4 bb4"),
    ];

    for &(label, text) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(label), text, |b, text| {
            b.iter(|| parse_sequence(black_box(text)))
        });
    }

    group.finish();
}
