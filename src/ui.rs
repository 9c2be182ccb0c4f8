//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::UiSettings;
use crate::playlist::Playlist;
use crate::session::SessionSnapshot;

const CONTROLS: &[(&str, &str)] = &[
    ("n/l/enter", "next track"),
    ("s", "shuffle"),
    ("r", "reload folder"),
    ("q/esc", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the status line: now playing, elapsed time, shuffle and folder.
fn status_text(app: &App, snapshot: &SessionSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    match (&snapshot.current_track, snapshot.current_index) {
        (Some(track), Some(idx)) => {
            let song = app.now_playing.clone().unwrap_or_else(|| track.name());
            let elapsed = app
                .playback_handle
                .as_ref()
                .and_then(|h| h.lock().ok().map(|info| (info.playing, info.elapsed)));
            match elapsed {
                Some((true, e)) => parts.push(format!("Song: {} [{}]", song, format_mmss(e))),
                _ => parts.push(format!("Song: {} [stopped]", song)),
            }
            parts.push(format!("#{}", idx + 1));
        }
        _ => parts.push("Nothing playing".to_string()),
    }

    if snapshot.shuffle_enabled {
        parts.push("Shuffle: ON".to_string());
    } else {
        parts.push("Shuffle: OFF".to_string());
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

/// Compute the visible window of a list of `total` rows that keeps
/// `selected` centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playlist: &Playlist,
    snapshot: &SessionSnapshot,
    ui_settings: &UiSettings,
) {
    let message_rows = app.messages().count().max(1) as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(message_rows),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" riffle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, snapshot))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Playlist in its current ordering; only build items for the visible window.
    {
        let total = playlist.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let selected = snapshot.current_index.unwrap_or(0);
        let (start, end) = visible_window(total, list_height, selected);

        let items: Vec<ListItem> = playlist.tracks()[start..end]
            .iter()
            .map(|t| ListItem::new(t.name()))
            .collect();

        let title = format!(" playlist ({}) ", total);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if let Some(idx) = snapshot.current_index {
            state.select(Some(idx - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let messages = Paragraph::new(app.messages().collect::<Vec<_>>().join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" messages ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(messages, chunks[3]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
