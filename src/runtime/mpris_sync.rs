use crate::error::ErrorKind;
use crate::mpris::MprisHandle;
use crate::session::SessionEvent;

/// Mirror a session event into the MPRIS shared state.
pub fn apply_event(mpris: &MprisHandle, event: &SessionEvent) {
    match event {
        SessionEvent::NowPlaying { title, artist } => {
            mpris.set_now_playing(Some(title.clone()), Some(artist.clone()));
        }
        SessionEvent::PlaybackError {
            kind: ErrorKind::NotReadable,
            track,
            ..
        } => {
            mpris.set_now_playing(Some(track.name()), None);
        }
        SessionEvent::PlaylistLoaded { .. } => mpris.set_now_playing(None, None),
        SessionEvent::ShuffleStateChanged { enabled } => mpris.set_shuffle(*enabled),
        SessionEvent::PlaybackError { .. } | SessionEvent::LoadError { .. } => {}
    }
}
