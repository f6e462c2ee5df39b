//! Benchmarks for the full three-source tick.
//!
//! One tick has to fit in the 22.7 µs sample period with plenty of room to
//! spare; these numbers are per block, so divide by the block size.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundmap::{engine::ControlMessage, Engine, ListenerPosition, SpatialFrame, StereoFrame};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let listener = ListenerPosition::new(100, 150).unwrap();
    let frame = SpatialFrame::compute(&listener);

    for &size in BLOCK_SIZES {
        let mut out = vec![StereoFrame::SILENT; size];
        let mut rx: VecDeque<ControlMessage> = VecDeque::new();

        // Before any recompute: every channel idle at zero
        let mut engine = Engine::new();
        group.bench_with_input(BenchmarkId::new("silent", size), &size, |b, _| {
            b.iter(|| {
                engine.render(&mut rx, black_box(&mut out));
            })
        });

        // All three sources sounding
        let mut engine = Engine::new();
        engine.apply_spatial(&frame);
        group.bench_with_input(BenchmarkId::new("playing", size), &size, |b, _| {
            b.iter(|| {
                engine.render(&mut rx, black_box(&mut out));
            })
        });

        // A recompute arriving at the top of every block, re-arming far-ear timers
        let mut engine = Engine::new();
        group.bench_with_input(BenchmarkId::new("retrigger", size), &size, |b, _| {
            b.iter(|| {
                rx.push_back(ControlMessage::Spatial(frame));
                engine.render(&mut rx, black_box(&mut out));
            })
        });
    }

    group.finish();
}
