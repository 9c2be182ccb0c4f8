//! Audio-related small types and handles.
//!
//! Commands understood by the audio thread and the playback info it shares
//! with the front-end.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::DeviceError;

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Stop whatever is rendering and start `path`; the outcome goes to `reply`.
    Play {
        path: PathBuf,
        reply: Sender<Result<(), DeviceError>>,
    },
    /// Stop playback and release the current stream.
    Stop,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Whether a track is currently rendering.
    pub playing: bool,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Set when the current track ran out on its own; cleared by `take_finished`.
    pub finished: bool,
}

impl PlaybackInfo {
    /// Consume the "track finished" notification, if any.
    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
