use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Enumerate the tracks under `dir` that have a recognized audio extension.
///
/// Unreadable entries are skipped. The result is sorted by path,
/// case-insensitively, so a folder always loads in the same natural order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let exts = normalized_extensions(settings);
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_audio_file(path, &exts) {
            tracks.push(Track::new(path));
        }
    }

    tracks.sort_by_key(|t| t.path().to_string_lossy().to_lowercase());
    debug!(dir = %dir.display(), count = tracks.len(), "scanned folder");
    tracks
}
