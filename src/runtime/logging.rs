use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Where log output goes, or `None` when logging is disabled.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    if !settings.enabled {
        return None;
    }
    settings.file.clone().or_else(default_log_path)
}

/// Install the global `tracing` subscriber, writing plain text to the log file.
///
/// The terminal belongs to the TUI, so nothing is logged to stdout/stderr.
/// Failures are reported once on stderr (before the TUI starts) and leave
/// logging off. Returns the file in use.
pub fn init_logging(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = log_path(settings)?;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("riffle: cannot create log dir {}: {e}", parent.display());
            return None;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("riffle: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let filter = EnvFilter::try_from_env("RIFFLE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!("riffle: logging disabled: {e}");
            None
        }
    }
}
