//! Benchmarks for note parsing and part broadcasting.
//!
//! Run with: cargo bench
//!
//! Live-coding sessions re-evaluate whole instrument definitions on every
//! edit, so loading and chaining should stay far below a frame.
//!
//! Benchmark groups:
//!   - notation/*   Mini-notation parsing
//!   - broadcast/*  Chain scale/sound calls and full bundle loads

use criterion::{criterion_group, criterion_main};

mod broadcast;
mod notation;

/// Part counts used for broadcast benchmarks.
pub const PART_COUNTS: &[usize] = &[1, 4, 16, 64];

criterion_group!(
    benches,
    notation::bench_notation,
    broadcast::bench_chain,
    broadcast::bench_load,
);
criterion_main!(benches);
