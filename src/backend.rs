//! Media backend: the narrow interface the player core drives, and its
//! `rodio`-based implementation.
//!
//! Commands flow one way (core -> backend), notifications flow the other
//! way as [`MediaEvent`] values. Backend events are the only source of
//! truth for transport state; the core never polls the output device.

mod output;
mod sink;
mod types;

pub use output::RodioBackend;
pub use types::{BackendError, MediaBackend, MediaEvent, PlaybackState};
