//! Benchmarks for chain broadcasting and bundle loading.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use strudel_helpers::{
    build_chainable, load_instrument, pattern::transform, Bundle, MiniNotation, NoteParser,
    PartMap, Pattern, PatternExt,
};

use crate::PART_COUNTS;

fn parts(count: usize) -> PartMap<Pattern> {
    (0..count)
        .map(|i| {
            let pattern = MiniNotation
                .parse("0 2 4 [5 7]")
                .unwrap_or_else(|_| Pattern::from_code("silence"));
            (format!("p{i}"), pattern)
        })
        .collect()
}

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast/chain");

    for &count in PART_COUNTS {
        let chain = build_chainable(parts(count));
        group.bench_with_input(BenchmarkId::new("scale_sound", count), &count, |b, _| {
            b.iter(|| black_box(&chain).scale("C:major").sound("piano"))
        });
    }

    group.finish();
}

pub fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast/load");

    for &count in PART_COUNTS {
        let names: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
        group.bench_with_input(BenchmarkId::new("named_effects", count), &count, |b, _| {
            b.iter(|| {
                let bundle = Bundle::from_parts(names.iter().map(|n| (n.clone(), "0 2 4 [5 7]")))
                    .with_scale("C:major")
                    .with_sound("piano")
                    .with_effects(transform(|p: Pattern| p.gain(0.8).room(0.2)));
                load_instrument(black_box(bundle))
            })
        });
    }

    group.finish();
}
