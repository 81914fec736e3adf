//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::BackendError;

/// Create a paused `Sink` for `path` starting at `start_at`, plus the total
/// duration when the decoder can report one.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), BackendError> {
    let file = File::open(path).map_err(|source| BackendError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| BackendError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // Query the total before wrapping; the skip adapter forwards it, but the
    // plain decoder is the authoritative answer.
    let total = source.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = source.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
