//! The playback session state machine.
//!
//! A `PlaybackSession` owns the playlist, the current position and the
//! shuffle flag, and drives the metadata reader and the audio sink when it
//! advances. Outcomes the front-end should display are sent as
//! `SessionEvent`s.

mod events;
mod model;

pub use events::SessionEvent;
pub use model::*;
