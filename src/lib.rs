pub mod config; // Compile-time tuning constants
pub mod dsp;
pub mod engine; // Sample-tick routine and deferred far-ear timers
pub mod error;
pub mod io;
pub mod spatial; // Listener geometry and interaural cues
pub mod voices; // Bird, car and bell sources

pub use engine::{Engine, EngineSnapshot};
pub use error::{ControlError, PositionError};
pub use io::dac::StereoFrame;
pub use spatial::{Ear, ListenerPosition, SpatialFrame, SpatialState};
pub use voices::Source;
