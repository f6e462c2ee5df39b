//! End-to-end scenarios: the full sample tick and the control-plane recompute.

mod engine;
mod spatial;

pub use engine::bench_engine;
pub use spatial::bench_spatial;
