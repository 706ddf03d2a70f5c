use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use spindrift_core::config::SpindriftConfig;
use spindrift_engine::replay;

/// Deterministic pseudo-random spin sequence; no RNG dependency needed.
fn spin_sequence(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 37) as u8
        })
        .collect()
}

fn bench_replay(c: &mut Criterion) {
    let config = SpindriftConfig::default();
    let mut group = c.benchmark_group("replay");
    for len in [50usize, 200, 1000] {
        let spins = spin_sequence(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &spins, |b, spins| {
            b.iter(|| replay(black_box(&config), black_box(spins)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
