//! Album Organizer: albums are derived from the flat track list, never authored.

use std::sync::Arc;

use uuid::Uuid;

use crate::library::{CoverArt, Track};

/// Group title for tracks without an album tag.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    /// Stable for a given title.
    pub id: String,
    pub title: String,
    /// Taken from the first track of the group.
    pub artist: String,
    /// Taken from the first track of the group.
    pub cover_art: Option<Arc<CoverArt>>,
    pub tracks: Vec<Track>,
}

fn album_id(title: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, title.as_bytes()).to_string()
}

/// Group `tracks` by album title.
///
/// Albums appear in the order their title is first seen; tracks keep their
/// playlist order inside each album.
pub fn organize_albums(tracks: &[Track]) -> Vec<Album> {
    let mut albums: Vec<Album> = Vec::new();

    for track in tracks {
        let title = track.album.as_deref().unwrap_or(UNKNOWN_ALBUM);
        match albums.iter_mut().find(|a| a.title == title) {
            Some(album) => album.tracks.push(track.clone()),
            None => albums.push(Album {
                id: album_id(title),
                title: title.to_string(),
                artist: track.artist.clone(),
                cover_art: track.cover_art.clone(),
                tracks: vec![track.clone()],
            }),
        }
    }

    albums
}
