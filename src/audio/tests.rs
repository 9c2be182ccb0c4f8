use super::types::PlaybackInfo;
use std::time::Duration;

#[test]
fn take_finished_is_consumed_once() {
    let mut info = PlaybackInfo {
        playing: false,
        elapsed: Duration::from_secs(3),
        finished: true,
    };
    assert!(info.take_finished());
    assert!(!info.take_finished());
    assert_eq!(info.elapsed, Duration::from_secs(3));
}

#[test]
fn default_info_is_idle() {
    let info = PlaybackInfo::default();
    assert!(!info.playing);
    assert!(!info.finished);
    assert_eq!(info.elapsed, Duration::ZERO);
}

#[test]
fn starting_a_track_clears_a_pending_finish() {
    use super::thread::reset_info;
    use std::sync::{Arc, Mutex};

    let handle = Arc::new(Mutex::new(PlaybackInfo {
        playing: false,
        elapsed: Duration::from_secs(200),
        finished: true,
    }));

    reset_info(&handle, true);
    let mut info = handle.lock().unwrap();
    assert!(info.playing);
    assert_eq!(info.elapsed, Duration::ZERO);
    assert!(!info.take_finished());
}
