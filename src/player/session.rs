use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::backend::{MediaBackend, MediaEvent, PlaybackState};
use crate::library::{Library, Track};
use crate::search::{FilteredView, SearchIndex};

use super::sequencer::{PlaybackSequencer, RepeatMode};
use super::transport::TransportState;

/// One player session: the library, the active query, the sequencing and
/// transport state, and the backend they drive.
///
/// Every mutation goes through this struct, from a single thread. The
/// presentation shell calls the command methods, feeds backend
/// notifications into [`handle_event`](Self::handle_event) and re-renders
/// from the accessors.
pub struct PlayerSession<B: MediaBackend> {
    library: Library,
    index: SearchIndex,
    sequencer: PlaybackSequencer,
    transport: TransportState,
    backend: B,
    last_error: Option<String>,
}

impl<B: MediaBackend> PlayerSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            library: Library::new(),
            index: SearchIndex::new(),
            sequencer: PlaybackSequencer::new(),
            transport: TransportState::new(),
            backend,
            last_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn track_count(&self) -> usize {
        self.library.count()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.sequencer.current()
    }

    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    pub fn shuffle(&self) -> bool {
        self.sequencer.shuffle()
    }

    pub fn repeat(&self) -> RepeatMode {
        self.sequencer.repeat()
    }

    /// The most recent backend failure, cleared on read.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Feed scanner output into the library. Returns how many paths were new.
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let mut added = 0;
        for path in paths {
            if self.library.add(path) {
                added += 1;
            }
        }
        if added > 0 {
            info!("library now holds {} tracks", self.library.count());
        }
        added
    }

    pub fn set_query(&mut self, text: &str) {
        self.index.set_query(text);
    }

    /// The current filtered, sorted view of the library.
    pub fn visible(&self) -> FilteredView<'_> {
        self.index.filtered_view(&self.library)
    }

    /// Play the track at `row` of the visible list. Out-of-range rows are
    /// ignored.
    pub fn play_row(&mut self, row: usize) {
        let view = self.index.filtered_view(&self.library);
        if let Some(track) = self.sequencer.play_at(&view, row) {
            debug!("play {}", track.path.display());
            self.backend.load_and_play(&track.path);
        }
    }

    /// Skip forward per shuffle/repeat policy. At the end of the list with
    /// repeat off this does nothing and the current track keeps playing.
    pub fn play_next(&mut self) {
        let view = self.index.filtered_view(&self.library);
        if let Some(track) = self.sequencer.play_next(&view) {
            debug!("next: {}", track.path.display());
            self.backend.load_and_play(&track.path);
        }
    }

    /// Navigate back through history, falling back to the row above.
    pub fn play_previous(&mut self) {
        let view = self.index.filtered_view(&self.library);
        if let Some(track) = self.sequencer.play_previous(&view) {
            debug!("previous: {}", track.path.display());
            self.backend.load_and_play(&track.path);
        }
    }

    /// Pause/resume toggle. When stopped, restarts the loaded track from
    /// the beginning, or starts the first visible track when nothing was
    /// ever loaded.
    pub fn toggle_pause(&mut self) {
        match self.transport.status() {
            PlaybackState::Playing => self.backend.pause(),
            PlaybackState::Paused => self.backend.resume(),
            PlaybackState::Stopped => match self.sequencer.current().cloned() {
                Some(track) => self.backend.load_and_play(&track.path),
                None => self.play_row(0),
            },
        }
    }

    /// Stop playback. The current track stays loaded in the sequencer so a
    /// later toggle restarts it; only an explicit stop resets the transport.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.transport.on_state(PlaybackState::Stopped);
    }

    /// Seek to `fraction` of the current track; silently dropped while the
    /// duration is unknown.
    pub fn seek_to(&mut self, fraction: f64) {
        if let Some(target) = self.transport.seek_target(fraction) {
            self.backend.seek(target);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.backend.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn toggle_shuffle(&mut self) {
        self.sequencer.toggle_shuffle();
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.sequencer.set_repeat(mode);
    }

    pub fn cycle_repeat(&mut self) {
        self.sequencer.cycle_repeat();
    }

    /// Dispatch one backend notification. This is the only place backend
    /// state enters the core.
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::PositionChanged(ms) => self.transport.on_position(ms),
            MediaEvent::DurationChanged(ms) => self.transport.on_duration(ms),
            MediaEvent::StateChanged(state) => self.transport.on_state(state),
            MediaEvent::EndOfMedia => self.advance_after_end(),
            MediaEvent::Failed { path, message } => {
                warn!("backend failed on {}: {message}", path.display());
                self.last_error = Some(message);
                self.transport.on_state(PlaybackState::Stopped);
            }
        }
    }

    fn advance_after_end(&mut self) {
        let view = self.index.filtered_view(&self.library);
        match self.sequencer.on_track_ended(&view) {
            Some(track) => {
                debug!("track ended, continuing with {}", track.path.display());
                self.backend.load_and_play(&track.path);
            }
            // End of the list with repeat off: playback naturally ends.
            None => self.transport.on_state(PlaybackState::Stopped),
        }
    }
}
