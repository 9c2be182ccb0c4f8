use std::path::PathBuf;

use tracing::{debug, info};

use crate::app::App;
use crate::audio::AudioSink;
use crate::config::Settings;
use crate::library::scan;
use crate::metadata::TrackMetadataReader;
use crate::session::PlaybackSession;

/// Session commands from every front-end (keys, MPRIS, auto-advance).
///
/// All of them go through [`handle`] on the thread that owns the session,
/// one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan a folder and load it as the new playlist.
    Load(PathBuf),
    Advance,
    ToggleShuffle,
    SetShuffle(bool),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the session.
pub fn handle<R, S>(
    cmd: Command,
    session: &mut PlaybackSession<R, S>,
    app: &mut App,
    settings: &Settings,
) -> Flow
where
    R: TrackMetadataReader,
    S: AudioSink,
{
    debug!(?cmd, "dispatch");
    match cmd {
        Command::Load(dir) => {
            let tracks = scan(&dir, &settings.library);
            // A failed load is reported through the session's LoadError event
            // and keeps the previous folder current.
            if session.load_folder(tracks).is_ok() {
                app.set_current_dir(dir.display().to_string());
                if settings.playback.autoplay {
                    advance(session, app, settings.playback.skip_unplayable);
                }
            }
        }
        Command::Advance => advance(session, app, settings.playback.skip_unplayable),
        Command::ToggleShuffle => {
            session.toggle_shuffle();
        }
        Command::SetShuffle(enabled) => {
            session.set_shuffle(enabled);
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Advance once; with `skip_unplayable`, keep going while audio fails to
/// start, for at most `len - 1` extra advances.
///
/// With shuffle off that visits every other track once. With shuffle on
/// each retry draws from a fresh reshuffle, so a broken track can come up
/// again and a playable one can be missed.
fn advance<R, S>(session: &mut PlaybackSession<R, S>, app: &mut App, skip_unplayable: bool)
where
    R: TrackMetadataReader,
    S: AudioSink,
{
    let mut adv = match session.advance() {
        Ok(a) => a,
        Err(e) => {
            app.push_message(format!("Cannot advance: {e}"));
            return;
        }
    };

    if !skip_unplayable {
        return;
    }

    let mut attempts = session.playlist().len().saturating_sub(1);
    while !adv.audio_started && attempts > 0 {
        attempts -= 1;
        info!(index = adv.index, track = %adv.track.path().display(), "skipping unplayable track");
        match session.advance() {
            Ok(a) => adv = a,
            Err(_) => break,
        }
    }
}
