use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::DeviceError;

use super::types::{AudioCmd, PlaybackHandle};

/// Open and decode `path` into a paused `Sink` on `stream`.
fn open_sink(stream: &OutputStream, path: &Path) -> Result<Sink, DeviceError> {
    let file = File::open(path).map_err(|source| DeviceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| DeviceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Start a fresh track's playback info: elapsed zero, no pending `finished`.
pub(super) fn reset_info(playback_info: &PlaybackHandle, playing: bool) {
    if let Ok(mut info) = playback_info.lock() {
        info.playing = playing;
        info.elapsed = Duration::ZERO;
        info.finished = false;
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // A missing device is not fatal: every play request reports it instead.
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped, which is noisy for a TUI.
                s.log_on_drop(false);
                Ok(s)
            }
            Err(e) => {
                warn!("no audio output device: {e}");
                Err(e.to_string())
            }
        };

        let mut sink: Option<Sink> = None;
        let mut started_at: Option<Instant> = None;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Play { path, reply }) => {
                    // Never two streams at once: release the old one first.
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    started_at = None;

                    let result = match &stream {
                        Ok(stream) => open_sink(stream, &path),
                        Err(msg) => Err(DeviceError::NoOutputDevice(msg.clone())),
                    };

                    let outcome = match result {
                        Ok(new_sink) => {
                            new_sink.play();
                            sink = Some(new_sink);
                            started_at = Some(Instant::now());
                            debug!(path = %path.display(), "rendering started");
                            Ok(())
                        }
                        Err(e) => Err(e),
                    };

                    // Publish before replying so a stale `finished` from the
                    // previous track cannot be taken after play returns.
                    reset_info(&playback_info, outcome.is_ok());
                    let _ = reply.send(outcome);
                }

                Ok(AudioCmd::Stop) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                        debug!("rendering stopped");
                    }
                    started_at = None;
                    reset_info(&playback_info, false);
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(ref s) = sink {
                        fade_out_sink(s, fade_out_ms);
                        s.stop();
                    }
                    if let Ok(mut info) = playback_info.lock() {
                        info.playing = false;
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: publish elapsed time and detect natural end of track.
                    let ended = sink.as_ref().map(Sink::empty).unwrap_or(false);
                    if ended {
                        sink = None;
                        started_at = None;
                        debug!("track finished");
                    }
                    if let Ok(mut info) = playback_info.lock() {
                        if let Some(st) = started_at {
                            info.elapsed = st.elapsed();
                        }
                        if ended {
                            info.playing = false;
                            info.finished = true;
                        }
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
