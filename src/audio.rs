//! Audio output.
//!
//! `AudioSink` is the seam the session renders through. `RodioSink` is the
//! hardware implementation: a dedicated thread owns the rodio output stream
//! and plays at most one track at a time.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioSink;
pub use sink::AudioSink;
pub use types::{PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;
