use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `SPINDLE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SPINDLE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err("controls.volume_step must be within (0, 1]".to_string());
        }
        if !self.ui.rotation_deg_per_ms.is_finite() || self.ui.rotation_deg_per_ms < 0.0 {
            return Err("ui.rotation_deg_per_ms must be a non-negative number".to_string());
        }
        Ok(())
    }

    /// Directory holding favorites, theme and the log file.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(default_data_dir)
    }
}

/// Resolve the config path from `SPINDLE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SPINDLE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/spindle/config.toml`
/// or `~/.config/spindle/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("spindle").join("config.toml"))
}

/// `$XDG_DATA_HOME/spindle` or `~/.local/share/spindle`.
pub fn default_data_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("spindle"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
