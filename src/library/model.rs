use std::path::{Path, PathBuf};

/// An audio item the session can select for playback.
///
/// Identified by its file path; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    path: PathBuf,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short name for lists: the file stem, or the full path when there is none.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl From<PathBuf> for Track {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for Track {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
