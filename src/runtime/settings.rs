use crate::config;

/// Load settings, falling back to defaults when the config is unreadable or
/// invalid. The second value explains why defaults were used.
///
/// Runs before logging is set up, so the caller logs the explanation.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
