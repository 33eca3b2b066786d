//! Application model types: `App`, `View` and `Row`.
//!
//! `App` holds only what the terminal UI needs on top of the player state:
//! which list is shown, where the cursor is, the add-path prompt and a status
//! line. Playback itself lives in the `player::Store`.

use std::path::PathBuf;

use crate::favorites::FavoritesStore;
use crate::library::Track;
use crate::player::{Action, PlayerState};
use crate::theme::Theme;

/// Which list the main pane shows. `Tab` cycles through the top-level ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Songs,
    Albums,
    Favorites,
    /// Tracks of one album, by index into `PlayerState::albums`.
    Album(usize),
}

impl View {
    pub fn cycle(self) -> Self {
        match self {
            Self::Songs => Self::Albums,
            Self::Albums | Self::Album(_) => Self::Favorites,
            Self::Favorites => Self::Songs,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Songs => "Songs",
            Self::Albums => "Albums",
            Self::Favorites => "Favorites",
            Self::Album(_) => "Album",
        }
    }
}

/// One line of the main pane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Row {
    /// Index into `PlayerState::tracks`.
    Track(usize),
    /// Index into `PlayerState::albums`.
    Album(usize),
}

/// The main application model.
pub struct App {
    pub view: View,
    pub cursor: usize,
    /// Text typed into the add-path prompt; `None` while the prompt is closed.
    pub prompt: Option<String>,
    pub status: Option<String>,
    pub theme: Theme,
    pub header_text: String,
}

impl App {
    pub fn new(theme: Theme, header_text: impl Into<String>) -> Self {
        Self {
            view: View::Songs,
            cursor: 0,
            prompt: None,
            status: None,
            theme,
            header_text: header_text.into(),
        }
    }

    /// Rows of the active view.
    pub fn rows(&self, state: &PlayerState, favorites: &FavoritesStore) -> Vec<Row> {
        match self.view {
            View::Songs => (0..state.tracks.len()).map(Row::Track).collect(),
            View::Albums => (0..state.albums.len()).map(Row::Album).collect(),
            View::Favorites => state
                .tracks
                .iter()
                .enumerate()
                .filter(|(_, t)| favorites.contains(&t.id))
                .map(|(i, _)| Row::Track(i))
                .collect(),
            View::Album(a) => state
                .albums
                .get(a)
                .map(|album| {
                    album
                        .tracks
                        .iter()
                        .filter_map(|t| playlist_index(state, t))
                        .map(Row::Track)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn selected_row(&self, state: &PlayerState, favorites: &FavoritesStore) -> Option<Row> {
        self.rows(state, favorites).get(self.cursor).copied()
    }

    /// Track under the cursor, or the current track when the cursor is on an
    /// album (or nowhere).
    pub fn target_track<'a>(
        &self,
        state: &'a PlayerState,
        favorites: &FavoritesStore,
    ) -> Option<&'a Track> {
        match self.selected_row(state, favorites) {
            Some(Row::Track(i)) => state.tracks.get(i),
            _ => state.current_track(),
        }
    }

    /// What `Enter` does on the cursor row: play that track, or open the
    /// album under the cursor.
    pub fn activate(&mut self, state: &PlayerState, favorites: &FavoritesStore) -> Option<Action> {
        match self.selected_row(state, favorites)? {
            Row::Track(i) => Some(Action::PlayTrack(i)),
            Row::Album(a) => {
                self.open_album(a);
                None
            }
        }
    }

    /// Open the album under the cursor. Returns whether there was one.
    pub fn open_selected_album(&mut self, state: &PlayerState, favorites: &FavoritesStore) -> bool {
        match self.selected_row(state, favorites) {
            Some(Row::Album(a)) => {
                self.open_album(a);
                true
            }
            _ => false,
        }
    }

    pub fn open_album(&mut self, album: usize) {
        self.view = View::Album(album);
        self.cursor = 0;
    }

    /// Back from an album to the album list, with the cursor on that album.
    pub fn close_album(&mut self) -> bool {
        let View::Album(a) = self.view else {
            return false;
        };
        self.view = View::Albums;
        self.cursor = a;
        true
    }

    /// Play the open album from its first track.
    pub fn play_album(&self, state: &PlayerState) -> Option<Action> {
        let View::Album(a) = self.view else {
            return None;
        };
        let first = state.albums.get(a)?.tracks.first()?;
        playlist_index(state, first).map(Action::PlayTrack)
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.cycle();
        self.cursor = 0;
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keep the cursor inside a list of `len` rows.
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.pop();
        }
    }

    /// Close the prompt and return the entered path, `~` expanded.
    /// Blank input yields `None`.
    pub fn submit_prompt(&mut self) -> Option<PathBuf> {
        let raw = self.prompt.take()?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(expand_home(raw))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

fn playlist_index(state: &PlayerState, track: &Track) -> Option<usize> {
    state.tracks.iter().position(|t| t.id == track.id)
}

fn expand_home(raw: &str) -> PathBuf {
    let home = std::env::var_os("HOME");
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => PathBuf::from(home),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            PathBuf::from(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    }
}
