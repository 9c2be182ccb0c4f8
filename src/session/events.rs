use crate::error::ErrorKind;
use crate::library::Track;

/// Notifications produced by session operations, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new playlist replaced the previous one.
    PlaylistLoaded { tracks: usize },
    /// A load found nothing to play; the previous playlist is untouched.
    LoadError { kind: ErrorKind },
    /// Metadata for the track that just became current.
    NowPlaying { title: String, artist: String },
    /// A soft failure while starting the current track.
    PlaybackError {
        kind: ErrorKind,
        track: Track,
        detail: String,
    },
    ShuffleStateChanged { enabled: bool },
}
