//! Backend-facing small types: commands, events and errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Playback status as reported by the output device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Asynchronous notifications emitted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Current position within the loaded track, in milliseconds.
    PositionChanged(u64),
    /// Total duration of the loaded track in milliseconds; `0` means the
    /// decoder could not report one (the track is then not seekable).
    DurationChanged(u64),
    /// The output device changed state.
    StateChanged(PlaybackState),
    /// The loaded track played to its end.
    EndOfMedia,
    /// The backend could not open or play a file. Not fatal; the core
    /// surfaces the message and stays stopped.
    Failed { path: PathBuf, message: String },
}

/// The transport commands a media backend must accept.
///
/// Commands are fire-and-forget: failures surface later as
/// [`MediaEvent::Failed`] rather than as return values.
pub trait MediaBackend {
    /// Load `path` and start playing it from the beginning.
    fn load_and_play(&mut self, path: &Path);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Jump to `position_ms`. Ignored when nothing is loaded.
    fn seek(&mut self, position_ms: u64);
    /// Output volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
}

/// Why the output thread could not produce audio for a file.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Commands handled by the output thread.
#[derive(Debug)]
pub(super) enum OutputCmd {
    Load(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(u64),
    SetVolume(f32),
    Quit,
}
