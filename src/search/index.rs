use std::path::Path;

use crate::library::{Library, Track};

use super::normalize::tokenize;

/// Token query over track search keys.
///
/// Matching is AND across tokens: every token must be a substring of the
/// track's `search_key`. An empty query matches everything.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    tokens: Vec<String>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active query. The text is normalized and tokenized here;
    /// callers pass raw user input.
    pub fn set_query(&mut self, text: &str) {
        self.tokens = tokenize(text);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if `track` satisfies the current query.
    pub fn matches(&self, track: &Track) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        // A track without a search key is never filtered out.
        if track.search_key.is_empty() {
            return true;
        }
        self.tokens.iter().all(|t| track.search_key.contains(t.as_str()))
    }

    /// Project `library` through the current query.
    ///
    /// The view is rebuilt from scratch on every call; nothing is cached
    /// across query or library changes.
    pub fn filtered_view<'a>(&self, library: &'a Library) -> FilteredView<'a> {
        let mut tracks: Vec<&Track> = library.all().iter().filter(|t| self.matches(t)).collect();
        tracks.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });
        FilteredView { tracks }
    }
}

/// Read-only, ordered projection of the library under a query.
///
/// Holds borrows only; rebuilt whenever the query or the library changes.
#[derive(Debug)]
pub struct FilteredView<'a> {
    tracks: Vec<&'a Track>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&'a Track> {
        self.tracks.get(row).copied()
    }

    /// Row of the track with `path`, if it is visible.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Track> + '_ {
        self.tracks.iter().copied()
    }
}
