//! Front-end view model: `App` and `PlaybackState`.
//!
//! The session owns playback state; `App` only keeps what the screen needs
//! on top of it: the now-playing line built from session events and a short
//! history of messages.

use std::collections::VecDeque;

use crate::audio::PlaybackHandle;
use crate::error::ErrorKind;
use crate::metadata::TrackMetadata;
use crate::session::SessionEvent;

/// Coarse playback state shown in the status line and over MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// The main front-end model.
pub struct App {
    pub current_dir: Option<String>,
    /// "Artist - Title" of the current track, once known.
    pub now_playing: Option<String>,
    pub playback_handle: Option<PlaybackHandle>,
    messages: VecDeque<String>,
    message_history: usize,
}

impl App {
    /// Create an `App` that keeps at most `message_history` messages.
    pub fn new(message_history: usize) -> Self {
        Self {
            current_dir: None,
            now_playing: None,
            playback_handle: None,
            messages: VecDeque::new(),
            message_history: message_history.max(1),
        }
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Whether the audio thread reports a track rendering right now.
    pub fn playback(&self) -> PlaybackState {
        let playing = self
            .playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|info| info.playing))
            .unwrap_or(false);
        if playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    /// Append a message, dropping the oldest past the history limit.
    pub fn push_message(&mut self, msg: impl Into<String>) {
        self.messages.push_back(msg.into());
        while self.messages.len() > self.message_history {
            self.messages.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Fold a session event into the view.
    pub fn apply_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::PlaylistLoaded { tracks } => {
                self.now_playing = None;
                self.push_message(format!("Loaded {tracks} tracks"));
            }
            SessionEvent::LoadError { kind } => {
                self.push_message(format!("Load failed: {kind}"));
            }
            SessionEvent::NowPlaying { title, artist } => {
                let meta = TrackMetadata {
                    title: title.clone(),
                    artist: artist.clone(),
                };
                self.now_playing = Some(meta.display());
            }
            SessionEvent::PlaybackError {
                kind,
                track,
                detail,
            } => {
                if *kind == ErrorKind::NotReadable {
                    self.now_playing = Some(track.name());
                }
                self.push_message(format!("{kind}: {detail}"));
            }
            SessionEvent::ShuffleStateChanged { enabled } => {
                let state = if *enabled { "on" } else { "off" };
                self.push_message(format!("Shuffle is now {state}"));
            }
        }
    }
}
