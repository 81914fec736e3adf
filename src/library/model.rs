use std::collections::HashSet;
use std::path::PathBuf;

use crate::search::normalize;

/// A single known audio file. Created once when a scan discovers the file,
/// never mutated afterwards. `path` is the identity key.
#[derive(Clone, Debug)]
pub struct Track {
    pub path: PathBuf,
    /// File base name without the final extension; what the shell shows.
    pub display_name: String,
    /// Normalized blob of name, file name and containing directory.
    /// Used for matching only, never displayed.
    pub search_key: String,
}

impl Track {
    pub fn new(path: PathBuf) -> Self {
        let display_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let parent = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let search_key = normalize(&format!("{display_name} {file_name} {parent}"));

        Self {
            path,
            display_name,
            search_key,
        }
    }
}

/// The set of known tracks, keyed by path.
///
/// Enumeration order is stable between mutations but otherwise unspecified;
/// playback always goes through the filtered, sorted view.
#[derive(Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
    seen: HashSet<PathBuf>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path`, deriving its display name and search key.
    /// Returns `false` (and changes nothing) when the path is already known.
    pub fn add(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.tracks.push(Track::new(path));
        true
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn all(&self) -> &[Track] {
        &self.tracks
    }
}
