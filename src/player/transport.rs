use crate::backend::PlaybackState;

/// Transport state mirrored from backend events: status, duration and
/// position. Duration `0` means unknown, which disables seeking.
#[derive(Debug, Default)]
pub struct TransportState {
    status: PlaybackState,
    duration_ms: u64,
    position_ms: u64,
}

impl TransportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlaybackState {
        self.status
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn on_position(&mut self, ms: u64) {
        self.position_ms = ms;
    }

    pub fn on_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    pub fn on_state(&mut self, state: PlaybackState) {
        self.status = state;
        if state == PlaybackState::Stopped {
            self.position_ms = 0;
        }
    }

    pub fn seekable(&self) -> bool {
        self.duration_ms > 0
    }

    /// Normalized progress for a slider, or `None` while the duration is
    /// unknown (progress is then indeterminate).
    pub fn progress(&self) -> Option<f64> {
        if self.duration_ms == 0 {
            return None;
        }
        Some((self.position_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0))
    }

    /// Absolute position for `fraction` of the track, or `None` when the
    /// media is not seekable (the command is then silently dropped).
    pub fn seek_target(&self, fraction: f64) -> Option<u64> {
        if self.duration_ms == 0 {
            return None;
        }
        Some((fraction.clamp(0.0, 1.0) * self.duration_ms as f64) as u64)
    }

    /// "elapsed / total" line for status displays.
    pub fn clock(&self) -> String {
        format!(
            "{} / {}",
            format_elapsed(self.position_ms),
            format_elapsed(self.duration_ms)
        )
    }
}

/// Format `ms` as `M:SS`; minutes are unbounded, seconds zero-padded.
pub fn format_elapsed(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
