//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds what the screen shows
//! besides the session itself: the now-playing line and recent messages.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
