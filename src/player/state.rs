use crate::config::{PlaybackSettings, RepeatModeSetting};
use crate::library::Track;

use super::albums::Album;

/// What happens when a track runs out. Cycles `None -> All -> One -> None`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop after the last track.
    #[default]
    None,
    /// Wrap around to the first track.
    All,
    /// Replay the current track.
    One,
}

impl RepeatMode {
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::All,
            Self::All => Self::One,
            Self::One => Self::None,
        }
    }
}

impl From<RepeatModeSetting> for RepeatMode {
    fn from(s: RepeatModeSetting) -> Self {
        match s {
            RepeatModeSetting::None => Self::None,
            RepeatModeSetting::All => Self::All,
            RepeatModeSetting::One => Self::One,
        }
    }
}

/// The single source of truth for playback.
///
/// Invariants: `tracks` never holds two tracks with the same id, and
/// `current_track_index` is `None` exactly when nothing has been selected
/// (which includes an empty playlist). When set it is `< tracks.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Playlist order is insertion order.
    pub tracks: Vec<Track>,
    /// Always derived from `tracks`, never edited directly.
    pub albums: Vec<Album>,
    pub current_track_index: Option<usize>,
    /// Play *intent*; the sync layer tries to make the audio output match it.
    pub is_playing: bool,
    /// Seconds, as last reported by the audio output.
    pub current_time: f64,
    /// Seconds, as last reported by the audio output.
    pub duration: f64,
    /// Normalized to `[0, 1]`.
    pub volume: f32,
    pub is_muted: bool,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
    /// Disc angle in degrees, `[0, 360)`. Purely cosmetic.
    pub cd_rotation: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            albums: Vec::new(),
            current_track_index: None,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 0.8,
            is_muted: false,
            is_shuffled: false,
            repeat_mode: RepeatMode::None,
            cd_rotation: 0.0,
        }
    }
}

impl PlayerState {
    /// Initial state seeded from configuration.
    pub fn with_settings(initial_volume: f32, playback: &PlaybackSettings) -> Self {
        Self {
            volume: initial_volume.clamp(0.0, 1.0),
            is_shuffled: playback.shuffle,
            repeat_mode: playback.repeat_mode.into(),
            ..Self::default()
        }
    }

    /// The selected track, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track_index.and_then(|i| self.tracks.get(i))
    }

    /// True when the selection sits on the final playlist entry.
    pub fn is_last_track(&self) -> bool {
        match self.current_track_index {
            Some(i) => i + 1 >= self.tracks.len(),
            None => false,
        }
    }

    /// Volume the audio output should actually use.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }
}
