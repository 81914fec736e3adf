//! Playback core: sequencing policy, transport state and the session
//! object that ties them to a media backend.

mod sequencer;
mod session;
mod transport;

pub use sequencer::{PlaybackSequencer, RepeatMode};
pub use session::PlayerSession;
pub use transport::{TransportState, format_elapsed};
