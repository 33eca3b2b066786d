//! Commands sent to the audio thread and events coming back from it.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Replace the current source with the file at this path (paused).
    Load(PathBuf),
    /// Start or resume. Restarts from zero if the source already ran out.
    Play,
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Output volume in `[0, 1]`.
    SetVolume(f32),
    SetMuted(bool),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Shutdown { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Current position in seconds.
    TimeUpdate(f64),
    /// Length of the loaded source in seconds (0 when unknown).
    DurationChange(f64),
    /// The loaded source decoded and can start.
    CanPlay,
    /// A playing source ran out.
    Ended,
    /// Loading or decoding failed.
    Error(String),
    /// `Play` could not start (nothing playable is loaded).
    PlayRejected(String),
}

/// Listener filter; one per `AudioEvent` variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    TimeUpdate,
    DurationChange,
    CanPlay,
    Ended,
    Error,
    PlayRejected,
}

impl AudioEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TimeUpdate(_) => EventKind::TimeUpdate,
            Self::DurationChange(_) => EventKind::DurationChange,
            Self::CanPlay => EventKind::CanPlay,
            Self::Ended => EventKind::Ended,
            Self::Error(_) => EventKind::Error,
            Self::PlayRejected(_) => EventKind::PlayRejected,
        }
    }
}
