//! Track model and folder scanning.
//!
//! A `Track` is only an identifier (its path). Scanning turns a folder into
//! the ordered list of tracks a session can load; tag reading lives in
//! `crate::metadata`.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;
