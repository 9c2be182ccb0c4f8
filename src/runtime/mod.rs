use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::audio::RodioSink;
use crate::metadata::LoftyReader;
use crate::session::{PlaybackSession, SessionEvent};

mod dispatch;
mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub use dispatch::Command;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let log_file = logging::init_logging(&settings.logging);

    let dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        env::current_dir().unwrap_or_else(|_| PathBuf::from("Music"))
    });
    info!(dir = %dir.display(), log = ?log_file, "starting");

    let sink = RodioSink::new();
    let mut app = App::new(settings.ui.message_history);
    app.set_playback_handle(sink.playback_handle());

    let (events_tx, events_rx) = mpsc::channel::<SessionEvent>();
    let mut session = PlaybackSession::new(LoftyReader, sink, events_tx);

    let (control_tx, control_rx) = mpsc::channel::<Command>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    startup::apply_playback_defaults(&mut session, &mut app, &settings, dir);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut session,
            &mut app,
            &mpris,
            &events_rx,
            &control_rx,
            &mut state,
        )
    })();

    session
        .sink()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shut down");
    run_result
}
