use std::path::PathBuf;

use crate::app::App;
use crate::audio::AudioSink;
use crate::config;
use crate::metadata::TrackMetadataReader;
use crate::runtime::dispatch::{self, Command};
use crate::session::PlaybackSession;

/// Apply configured playback defaults and load the starting folder.
///
/// Shuffle is set before the load so an autoplayed first track already
/// comes from a shuffled ordering.
pub fn apply_playback_defaults<R, S>(
    session: &mut PlaybackSession<R, S>,
    app: &mut App,
    settings: &config::Settings,
    dir: PathBuf,
) where
    R: TrackMetadataReader,
    S: AudioSink,
{
    session.set_shuffle(settings.playback.shuffle);
    dispatch::handle(Command::Load(dir), session, app, settings);
}
