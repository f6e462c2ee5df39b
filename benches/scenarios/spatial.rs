//! Benchmark for a listener recompute (control plane, not the tick).

use std::hint::black_box;

use criterion::Criterion;
use soundmap::{ListenerPosition, SpatialFrame};

pub fn bench_spatial(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/spatial");
    let listeners = [
        ListenerPosition::initial(),
        ListenerPosition::new(90, 130).unwrap(),
        ListenerPosition::new(150, 221).unwrap(),
    ];

    group.bench_function("frame", |b| {
        b.iter(|| {
            for listener in &listeners {
                black_box(SpatialFrame::compute(black_box(listener)));
            }
        })
    });

    group.finish();
}
