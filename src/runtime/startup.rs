use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::config::LibrarySettings;
use crate::library::{expand_paths, import_batch};
use crate::player::{Action, Store};
use crate::sync::ErrorReporter;

/// Expand `selection`, import every file as one batch and add the result to
/// the playlist in a single dispatch. Returns how many tracks the playlist
/// gained; files already in it are not counted.
pub fn import_paths(store: &mut Store, selection: &[PathBuf], library: &LibrarySettings) -> usize {
    let files = expand_paths(selection, library);
    if files.is_empty() {
        return 0;
    }
    let tracks = import_batch(&files);
    if tracks.is_empty() {
        return 0;
    }
    let before = store.state().tracks.len();
    store.dispatch(Action::AddTracks(tracks));
    store.state().tracks.len().saturating_sub(before)
}

/// Logs playback failures and forwards them to the status line.
pub struct StatusReporter {
    tx: Sender<String>,
}

impl StatusReporter {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl ErrorReporter for StatusReporter {
    fn report(&mut self, message: &str) {
        log::error!("{message}");
        let _ = self.tx.send(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::player::PlayerState;

    #[test]
    fn reimporting_a_folder_counts_only_new_tracks() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A - One.mp3"), b"x").unwrap();
        fs::write(dir.path().join("A - Two.mp3"), b"x").unwrap();
        let library = LibrarySettings::default();
        let selection = vec![dir.path().to_path_buf()];
        let mut store = Store::new(PlayerState::default());

        assert_eq!(import_paths(&mut store, &selection, &library), 2);
        assert_eq!(import_paths(&mut store, &selection, &library), 0);

        fs::write(dir.path().join("A - Three.mp3"), b"x").unwrap();
        assert_eq!(import_paths(&mut store, &selection, &library), 1);
        assert_eq!(store.state().tracks.len(), 3);
    }

    #[test]
    fn nothing_to_import_leaves_the_store_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let mut store = Store::new(PlayerState::default());
        let selection = vec![dir.path().to_path_buf()];

        assert_eq!(import_paths(&mut store, &selection, &LibrarySettings::default()), 0);
        assert!(store.state().tracks.is_empty());
    }
}
