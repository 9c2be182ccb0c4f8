use super::*;
use crate::audio::PlaybackInfo;
use crate::error::ErrorKind;
use crate::library::Track;
use crate::session::SessionEvent;
use std::sync::{Arc, Mutex};

#[test]
fn now_playing_formats_artist_and_title() {
    let mut app = App::new(3);
    app.apply_event(&SessionEvent::NowPlaying {
        title: "Song".into(),
        artist: "Band".into(),
    });
    assert_eq!(app.now_playing.as_deref(), Some("Band - Song"));

    app.apply_event(&SessionEvent::NowPlaying {
        title: "Untitled".into(),
        artist: " ".into(),
    });
    assert_eq!(app.now_playing.as_deref(), Some("Untitled"));
}

#[test]
fn unreadable_track_falls_back_to_file_name() {
    let mut app = App::new(3);
    app.apply_event(&SessionEvent::PlaybackError {
        kind: ErrorKind::NotReadable,
        track: Track::from("/music/raw take.wav"),
        detail: "no tags found".into(),
    });
    assert_eq!(app.now_playing.as_deref(), Some("raw take"));
    assert_eq!(
        app.messages().collect::<Vec<_>>(),
        vec!["not readable: no tags found"]
    );
}

#[test]
fn device_error_keeps_now_playing() {
    let mut app = App::new(3);
    app.apply_event(&SessionEvent::NowPlaying {
        title: "Song".into(),
        artist: "Band".into(),
    });
    app.apply_event(&SessionEvent::PlaybackError {
        kind: ErrorKind::DeviceError,
        track: Track::from("/music/song.mp3"),
        detail: "unplugged".into(),
    });
    assert_eq!(app.now_playing.as_deref(), Some("Band - Song"));
}

#[test]
fn message_history_is_bounded() {
    let mut app = App::new(2);
    app.apply_event(&SessionEvent::ShuffleStateChanged { enabled: true });
    app.apply_event(&SessionEvent::LoadError {
        kind: ErrorKind::EmptySource,
    });
    app.apply_event(&SessionEvent::PlaylistLoaded { tracks: 5 });

    assert_eq!(
        app.messages().collect::<Vec<_>>(),
        vec!["Load failed: empty source", "Loaded 5 tracks"]
    );
}

#[test]
fn zero_history_still_keeps_latest_message() {
    let mut app = App::new(0);
    app.push_message("one");
    app.push_message("two");
    assert_eq!(app.messages().collect::<Vec<_>>(), vec!["two"]);
}

#[test]
fn playback_reads_shared_handle() {
    let mut app = App::new(1);
    assert_eq!(app.playback(), PlaybackState::Stopped);

    let handle = Arc::new(Mutex::new(PlaybackInfo::default()));
    app.set_playback_handle(handle.clone());
    assert_eq!(app.playback(), PlaybackState::Stopped);

    handle.lock().unwrap().playing = true;
    assert_eq!(app.playback(), PlaybackState::Playing);
}
