use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spindle/config.toml` or `~/.config/spindle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPINDLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume on startup, in `[0, 1]`.
    pub initial_volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// How often the audio thread reports the playback position (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.8,
            quit_fade_out_ms: 300,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Angular speed of the spinning disc, in degrees per millisecond.
    pub rotation_deg_per_ms: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ spindle: your records, offline ~ ".to_string(),
            rotation_deg_per_ms: 0.02,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by the up/down arrows.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Repeat mode on startup.
    pub repeat_mode: RepeatModeSetting,
}

#[derive(Debug, Copy, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[default]
    #[serde(alias = "no-repeat", alias = "no_repeat", alias = "off")]
    None,
    #[serde(alias = "repeat-all", alias = "repeat_all", alias = "loop-all")]
    All,
    #[serde(alias = "repeat-one", alias = "repeat_one", alias = "loop-one")]
    One,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where favorites, theme and the log file live.
    /// Defaults to `$XDG_DATA_HOME/spindle` or `~/.local/share/spindle`.
    pub data_dir: Option<PathBuf>,
}
