//! Offline driver for the gesture core: reads JSON Lines pose traces (or
//! generates synthetic ones) and runs them through a [`runner_core::Session`]
//! for threshold tuning without a camera.

pub mod replay;
pub mod synth;
pub mod trace;

pub use replay::{replay, LogActionSink, LogStatusSink, ReplayEvent, ReplayReport};
pub use synth::{Move, SynthConfig};
pub use trace::{read_trace, write_trace, TraceError, TraceKeypoint, TraceRecord};
