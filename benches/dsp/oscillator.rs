//! Benchmarks for DDS sample generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundmap::dsp::{oscillator::PhaseAccumulator, wavetable::SineTable};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let table = SineTable::new();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Fixed pitch - increment cached after the first call
        let mut osc = PhaseAccumulator::new();
        osc.set_frequency(2093.0);
        group.bench_with_input(BenchmarkId::new("fixed", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    osc.set_frequency(black_box(2093.0));
                    *out = osc.next_sample(&table);
                }
                black_box(&buffer);
            })
        });

        // Sweeping pitch - increment recomputed every sample
        let mut osc = PhaseAccumulator::new();
        let mut t = 0u32;
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    t = t.wrapping_add(1) % 5720;
                    osc.set_frequency(black_box(0.000153 * (t * t) as f32 + 2000.0));
                    *out = osc.next_sample(&table);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
