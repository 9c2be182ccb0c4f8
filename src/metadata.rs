//! Display metadata for tracks.

use lofty::prelude::*;

use crate::error::MetadataError;
use crate::library::Track;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
}

impl TrackMetadata {
    /// "Artist - Title", or just the title when the artist is unknown.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            a => format!("{} - {}", a, self.title),
        }
    }
}

/// Extracts display metadata for a track.
pub trait TrackMetadataReader {
    fn read(&self, track: &Track) -> Result<TrackMetadata, MetadataError>;
}

/// Reads tags with `lofty`, using the primary tag or the first one present.
///
/// A blank title falls back to the file stem; a blank artist stays empty.
/// Files lofty cannot parse, and files without any tag, are not readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl TrackMetadataReader for LoftyReader {
    fn read(&self, track: &Track) -> Result<TrackMetadata, MetadataError> {
        let not_readable = |reason: String| MetadataError::NotReadable {
            path: track.path().to_path_buf(),
            reason,
        };

        let tagged = lofty::read_from_path(track.path()).map_err(|e| not_readable(e.to_string()))?;
        let tag = tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .ok_or_else(|| not_readable("no tags found".to_string()))?;

        let title = tag
            .title()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| track.name());
        let artist = tag
            .artist()
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        Ok(TrackMetadata { title, artist })
    }
}
