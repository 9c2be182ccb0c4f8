use std::sync::mpsc::Sender;

use tracing::{info, warn};

use crate::audio::AudioSink;
use crate::error::SessionError;
use crate::library::Track;
use crate::metadata::TrackMetadataReader;
use crate::playlist::Playlist;

use super::events::SessionEvent;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No playlist loaded yet.
    Empty,
    /// A playlist is loaded but nothing has been played since.
    Idle,
    /// The track at this index is current.
    Playing(usize),
}

/// Read-only view of the session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_track: Option<Track>,
    /// `None` until the first advance after a load.
    pub current_index: Option<usize>,
    pub shuffle_enabled: bool,
}

/// Result of a committed advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advanced {
    pub index: usize,
    pub track: Track,
    /// Whether the sink accepted the track.
    pub audio_started: bool,
}

pub struct PlaybackSession<R, S> {
    reader: R,
    sink: S,
    events: Sender<SessionEvent>,
    playlist: Playlist,
    current_index: Option<usize>,
    current_track: Option<Track>,
    shuffle: bool,
}

impl<R: TrackMetadataReader, S: AudioSink> PlaybackSession<R, S> {
    /// Create an empty session reporting to `events`.
    pub fn new(reader: R, sink: S, events: Sender<SessionEvent>) -> Self {
        Self {
            reader,
            sink,
            events,
            playlist: Playlist::default(),
            current_index: None,
            current_track: None,
            shuffle: false,
        }
    }

    /// Replace the playlist with `tracks` and return to Idle.
    ///
    /// With no tracks this fails with `EmptySource` and leaves the session
    /// exactly as it was. A successful load also stops any track still
    /// rendering.
    pub fn load_folder(
        &mut self,
        tracks: impl IntoIterator<Item = Track>,
    ) -> Result<usize, SessionError> {
        let playlist = match Playlist::load(tracks) {
            Ok(p) => p,
            Err(e) => {
                warn!("load rejected: {e}");
                self.emit(SessionEvent::LoadError { kind: e.kind() });
                return Err(e);
            }
        };

        let len = playlist.len();
        self.playlist = playlist;
        self.current_index = None;
        self.current_track = None;
        self.sink.stop();

        info!(tracks = len, "playlist loaded");
        self.emit(SessionEvent::PlaylistLoaded { tracks: len });
        Ok(len)
    }

    /// Flip shuffle mode and return the new value.
    ///
    /// Only affects the ordering used by the next advance.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        info!(enabled = self.shuffle, "shuffle toggled");
        self.emit(SessionEvent::ShuffleStateChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Set shuffle mode explicitly. Emits an event only when it changes.
    pub fn set_shuffle(&mut self, enabled: bool) -> bool {
        if self.shuffle != enabled {
            self.toggle_shuffle();
        }
        self.shuffle
    }

    /// Move to the next track and start it.
    ///
    /// With shuffle on, the *whole* playlist is reshuffled before every
    /// step, played tracks included, so a recently heard track can come
    /// back sooner than it would with an unplayed-tail shuffle. Past the
    /// last position the index wraps to 0.
    ///
    /// The new position is committed before any I/O. Metadata and audio
    /// failures are reported as `PlaybackError` events and never undo it.
    pub fn advance(&mut self) -> Result<Advanced, SessionError> {
        if self.playlist.is_empty() {
            warn!("advance with no playlist loaded");
            return Err(SessionError::EmptyPlaylist);
        }

        if self.shuffle {
            self.playlist = self.playlist.shuffled();
        }

        let next = match self.current_index {
            Some(i) if i + 1 < self.playlist.len() => i + 1,
            _ => 0,
        };
        let Some(track) = self.playlist.get(next).cloned() else {
            return Err(SessionError::EmptyPlaylist);
        };
        self.current_index = Some(next);
        self.current_track = Some(track.clone());
        info!(index = next, track = %track.path().display(), "advanced");

        match self.reader.read(&track) {
            Ok(meta) => self.emit(SessionEvent::NowPlaying {
                title: meta.title,
                artist: meta.artist,
            }),
            Err(e) => {
                warn!("{e}");
                self.emit(SessionEvent::PlaybackError {
                    kind: e.kind(),
                    track: track.clone(),
                    detail: e.to_string(),
                });
            }
        }

        let audio_started = match self.sink.play(&track) {
            Ok(()) => true,
            Err(e) => {
                warn!("playback failed for {}: {e}", track.path().display());
                self.emit(SessionEvent::PlaybackError {
                    kind: e.kind(),
                    track: track.clone(),
                    detail: e.to_string(),
                });
                false
            }
        };

        Ok(Advanced {
            index: next,
            track,
            audio_started,
        })
    }

    pub fn current_state(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_track: self.current_track.clone(),
            current_index: self.current_index,
            shuffle_enabled: self.shuffle,
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.playlist.is_empty(), self.current_index) {
            (true, _) => SessionState::Empty,
            (false, None) => SessionState::Idle,
            (false, Some(i)) => SessionState::Playing(i),
        }
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    /// The playlist in its current ordering.
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine; the session keeps working.
        let _ = self.events.send(event);
    }
}
