//! Error types shared by the playlist, session and its collaborators.
//!
//! `SessionError` values are hard failures: the operation that returned
//! one changed nothing. `MetadataError` and `DeviceError` are soft: they
//! are reported as events after the session already moved on.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Hard failures of session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A load was attempted with zero eligible tracks.
    #[error("no playable tracks found")]
    EmptySource,
    /// An advance was attempted while no playlist is loaded.
    #[error("playlist is empty")]
    EmptyPlaylist,
}

/// Metadata extraction failed for a track.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot read tags from {path:?}: {reason}")]
    NotReadable { path: PathBuf, reason: String },
}

/// The audio output could not start rendering a track.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio thread is not running")]
    Disconnected,
}

/// Classification carried by session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptySource,
    EmptyPlaylist,
    NotReadable,
    DeviceError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::EmptySource => "empty source",
            ErrorKind::EmptyPlaylist => "empty playlist",
            ErrorKind::NotReadable => "not readable",
            ErrorKind::DeviceError => "device error",
        };
        f.write_str(s)
    }
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::EmptySource => ErrorKind::EmptySource,
            SessionError::EmptyPlaylist => ErrorKind::EmptyPlaylist,
        }
    }
}

impl MetadataError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotReadable
    }
}

impl DeviceError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DeviceError
    }
}
