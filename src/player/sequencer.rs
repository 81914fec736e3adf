use std::path::PathBuf;

use rand::Rng;

use crate::library::Track;
use crate::search::FilteredView;

/// What happens when a track ends or the listener skips past the edges of
/// the visible list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// Playback stops at the end of the list.
    Off,
    /// Wrap around to the other end of the list.
    All,
    /// Replay the current track when it ends.
    One,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

/// Decides which track plays next.
///
/// The sequencer only answers "what comes next" questions against the
/// filtered view it is handed; issuing backend commands is the session's
/// job. Rows are resolved by locating the current track's path in the view,
/// so a track filtered out of view behaves like no selection at all.
#[derive(Debug, Default)]
pub struct PlaybackSequencer {
    current: Option<Track>,
    history: Vec<PathBuf>,
    shuffle: bool,
    repeat: RepeatMode,
}

impl PlaybackSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Step Off -> All -> One -> Off.
    pub fn cycle_repeat(&mut self) {
        self.repeat = match self.repeat {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
    }

    /// Select the track at `row` in `view` as the new current track.
    ///
    /// Returns the track to load, or `None` when the row is out of range
    /// (invalid selections are silently ignored). The track's path is
    /// appended to the history unless it equals the last entry.
    pub fn play_at(&mut self, view: &FilteredView<'_>, row: usize) -> Option<Track> {
        let track = view.get(row)?.clone();
        self.record(track.clone());
        Some(track)
    }

    /// Pick the next track per shuffle/repeat policy.
    ///
    /// Shuffle draws a uniformly random row and may land on the current
    /// track again; that matches the historical behavior and is kept as-is.
    pub fn play_next(&mut self, view: &FilteredView<'_>) -> Option<Track> {
        if view.is_empty() {
            return None;
        }
        let len = view.len();

        let next_row = if self.shuffle {
            rand::thread_rng().gen_range(0..len)
        } else {
            let candidate = match self.current_row(view) {
                Some(row) => row + 1,
                None => 0,
            };
            if candidate >= len {
                if self.repeat == RepeatMode::All {
                    0
                } else {
                    return None;
                }
            } else {
                candidate
            }
        };

        self.play_at(view, next_row)
    }

    /// Navigate back.
    ///
    /// With at least two history entries this is back-navigation: the most
    /// recent entry is discarded and the one before it replays without being
    /// re-appended, even if it is no longer visible in `view`. Otherwise it
    /// falls back to the row directly above the current one, wrapping to the
    /// last row only under `RepeatMode::All`.
    pub fn play_previous(&mut self, view: &FilteredView<'_>) -> Option<Track> {
        if self.history.len() >= 2 {
            self.history.pop();
            let path = self.history.last().cloned()?;
            let track = Track::new(path);
            self.current = Some(track.clone());
            return Some(track);
        }

        if view.is_empty() {
            return None;
        }
        let prev_row = match self.current_row(view) {
            Some(row) if row > 0 => row - 1,
            _ => {
                if self.repeat == RepeatMode::All {
                    view.len() - 1
                } else {
                    return None;
                }
            }
        };

        self.play_at(view, prev_row)
    }

    /// React to the backend reporting end-of-media: replay under
    /// `RepeatMode::One` (without touching history), otherwise advance.
    pub fn on_track_ended(&mut self, view: &FilteredView<'_>) -> Option<Track> {
        if self.repeat == RepeatMode::One {
            return self.current.clone();
        }
        self.play_next(view)
    }

    fn current_row(&self, view: &FilteredView<'_>) -> Option<usize> {
        self.current
            .as_ref()
            .and_then(|t| view.position_of(&t.path))
    }

    fn record(&mut self, track: Track) {
        if self.history.last() != Some(&track.path) {
            self.history.push(track.path.clone());
        }
        self.current = Some(track);
    }
}
