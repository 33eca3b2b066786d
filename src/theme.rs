//! Light/dark theme preference.

use std::fmt;

use crate::error::Result;
use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Guess from a `COLORFGBG` value (`"fg;bg"` or `"fg;x;bg"`).
    /// Background colors 0-6 and 8 are dark ones in the usual 16-color palette.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(match bg {
            0..=6 | 8 => Self::Dark,
            _ => Self::Light,
        })
    }

    /// The terminal's own preference, if it advertises one.
    pub fn from_environment() -> Option<Self> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme preference persisted under [`THEME_KEY`].
#[derive(Debug, Clone)]
pub struct ThemeStore {
    kv: KeyValueStore,
    theme: Theme,
}

impl ThemeStore {
    /// Saved theme, else the terminal hint, else light.
    pub fn load(kv: KeyValueStore) -> Self {
        let theme = Self::initial(&kv, Theme::from_environment());
        Self { kv, theme }
    }

    /// Resolve the starting theme from storage and an OS-level `hint`.
    /// Unknown stored values are logged and ignored.
    pub fn initial(kv: &KeyValueStore, hint: Option<Theme>) -> Theme {
        if let Some(saved) = kv.get(THEME_KEY) {
            match Theme::parse(&saved) {
                Some(theme) => return theme,
                None => log::warn!("ignoring unknown saved theme {saved:?}"),
            }
        }
        hint.unwrap_or_default()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.kv.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn colorfgbg_hint() {
        assert_eq!(Theme::from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(Theme::from_colorfgbg("12;default;8"), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg("garbage"), None);
        assert_eq!(Theme::from_colorfgbg(""), None);
    }

    #[test]
    fn saved_theme_beats_hint() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(dir.path());
        kv.set(THEME_KEY, "light").unwrap();
        assert_eq!(ThemeStore::initial(&kv, Some(Theme::Dark)), Theme::Light);
    }

    #[test]
    fn falls_back_to_hint_then_light() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(dir.path());
        assert_eq!(ThemeStore::initial(&kv, Some(Theme::Dark)), Theme::Dark);
        assert_eq!(ThemeStore::initial(&kv, None), Theme::Light);

        kv.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeStore::initial(&kv, None), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let dir = tempdir().unwrap();
        let kv = KeyValueStore::in_dir(dir.path());
        kv.set(THEME_KEY, "light").unwrap();

        let mut store = ThemeStore::load(kv.clone());
        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(kv.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(ThemeStore::load(kv).theme(), Theme::Dark);
    }
}
