//! Utilities for creating `rodio` sinks from files on disk.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's total duration when the format reports one.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>)> {
    let decode_err = |reason: String| Error::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| decode_err(e.to_string()))?;
    let source = Decoder::new(BufReader::new(file)).map_err(|e| decode_err(e.to_string()))?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
