//! Benchmarks for the ASD envelope step.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundmap::dsp::envelope::Envelope;
use soundmap::voices::BIRD;

use crate::BLOCK_SIZES;

fn bird_envelope() -> Envelope {
    Envelope::new(
        BIRD.envelope,
        BIRD.floor_amplitude,
        BIRD.max_amplitude,
        BIRD.counter_ceiling,
    )
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        // Running through attack, sustain and decay
        let mut env = bird_envelope();
        env.retrigger(BIRD.max_amplitude);
        group.bench_with_input(BenchmarkId::new("active", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    env.advance();
                }
                black_box(env.level());
            })
        });

        // Idle at the floor, counter still running
        let mut env = bird_envelope();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, &size| {
            b.iter(|| {
                for _ in 0..size {
                    env.advance();
                }
                black_box(env.level());
            })
        });
    }

    group.finish();
}
