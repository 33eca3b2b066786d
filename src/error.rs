//! Crate-wide error type.
//!
//! Nothing in the state machine can fail; errors only come out of the
//! edges (filesystem, tags, audio output, configuration).

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// A file could not be opened or decoded as audio.
    #[error("cannot decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// The audio output device or thread is unavailable.
    #[error("audio output error: {0}")]
    Audio(String),
}
