use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::DeviceError;
use crate::library::Track;

use super::sink::AudioSink;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// `AudioSink` backed by rodio on the default output device.
pub struct RodioSink {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone());

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// Fade out the current track and wait for the audio thread to exit.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, track: &Track) -> Result<(), DeviceError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(AudioCmd::Play {
                path: track.path().to_path_buf(),
                reply: reply_tx,
            })
            .map_err(|_| DeviceError::Disconnected)?;
        reply_rx.recv().map_err(|_| DeviceError::Disconnected)?
    }

    fn stop(&mut self) {
        let _ = self.tx.send(AudioCmd::Stop);
    }
}
