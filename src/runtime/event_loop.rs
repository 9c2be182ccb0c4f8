use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::AudioSink;
use crate::config;
use crate::metadata::TrackMetadataReader;
use crate::mpris::MprisHandle;
use crate::runtime::dispatch::{self, Command, Flow};
use crate::runtime::mpris_sync;
use crate::session::{PlaybackSession, SessionEvent};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_mpris_playback: app.playback(),
        }
    }
}

/// Main terminal event loop: folds session events into the view, feeds
/// remote and key commands to the dispatcher and draws. Returns `Ok(())`
/// when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run<R, S>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut PlaybackSession<R, S>,
    app: &mut App,
    mpris: &MprisHandle,
    events_rx: &Receiver<SessionEvent>,
    control_rx: &Receiver<Command>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: TrackMetadataReader,
    S: AudioSink,
{
    loop {
        for ev in events_rx.try_iter() {
            app.apply_event(&ev);
            mpris_sync::apply_event(mpris, &ev);
        }

        let playback = app.playback();
        if playback != state.last_mpris_playback {
            mpris.set_playback(playback);
            state.last_mpris_playback = playback;
        }

        // Continuous playback: the audio thread flags a natural end of track.
        if settings.playback.auto_advance && take_finished(app) {
            dispatch::handle(Command::Advance, session, app, settings);
        }

        let snapshot = session.current_state();
        terminal.draw(|f| ui::draw(f, app, session.playlist(), &snapshot, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if dispatch::handle(cmd, session, app, settings) == Flow::Quit {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = key_command(key, app) {
                    if dispatch::handle(cmd, session, app, settings) == Flow::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn take_finished(app: &App) -> bool {
    app.playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|mut info| info.take_finished()))
        .unwrap_or(false)
}

/// Map a key press to a session command.
fn key_command(key: KeyEvent, app: &App) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Enter => Some(Command::Advance),
        KeyCode::Char('s') => Some(Command::ToggleShuffle),
        KeyCode::Char('r') => app.current_dir.as_ref().map(|d| Command::Load(d.into())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::PlaybackInfo;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_commands() {
        let app = App::new(1);
        assert_eq!(key_command(press(KeyCode::Char('n')), &app), Some(Command::Advance));
        assert_eq!(key_command(press(KeyCode::Enter), &app), Some(Command::Advance));
        assert_eq!(
            key_command(press(KeyCode::Char('s')), &app),
            Some(Command::ToggleShuffle)
        );
        assert_eq!(key_command(press(KeyCode::Esc), &app), Some(Command::Quit));
        assert_eq!(key_command(press(KeyCode::Char('x')), &app), None);
    }

    #[test]
    fn reload_needs_a_current_dir() {
        let mut app = App::new(1);
        assert_eq!(key_command(press(KeyCode::Char('r')), &app), None);

        app.set_current_dir("/music".to_string());
        assert_eq!(
            key_command(press(KeyCode::Char('r')), &app),
            Some(Command::Load(PathBuf::from("/music")))
        );
    }

    #[test]
    fn finished_flag_is_taken_once() {
        let mut app = App::new(1);
        assert!(!take_finished(&app));

        let handle = Arc::new(Mutex::new(PlaybackInfo {
            finished: true,
            ..PlaybackInfo::default()
        }));
        app.set_playback_handle(handle);
        assert!(take_finished(&app));
        assert!(!take_finished(&app));
    }
}
