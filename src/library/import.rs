//! Import pipeline: user-selected files in, `Track` records out.
//!
//! Each file is probed on its own scoped thread; the batch is joined before
//! anything reaches the player so it can be added with one dispatch.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use lofty::prelude::*;
use lofty::tag::ItemKey;

use crate::error::Result;

use super::model::{CoverArt, Track, UNKNOWN_ARTIST};

/// Split a file stem of the form `Artist - Title`.
///
/// The split happens at the last dash so `AC-DC - Back` stays `AC-DC`.
/// Returns `(artist, title)`; without a usable dash the whole stem is the title.
/// A side that is blank after trimming makes the dash unusable, so
/// `Artist - ` keeps the full stem as its title rather than an empty one.
pub fn parse_file_name(stem: &str) -> (String, String) {
    if let Some(pos) = stem.rfind('-') {
        let artist = stem[..pos].trim();
        let title = stem[pos + 1..].trim();
        if !artist.is_empty() && !title.is_empty() {
            return (artist.to_string(), title.to_string());
        }
    }
    (UNKNOWN_ARTIST.to_string(), stem.to_string())
}

/// What the tags and stream properties could tell us about a file.
#[derive(Debug, Default)]
pub struct Probe {
    pub duration: f64,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub cover_art: Option<CoverArt>,
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_year(text: &str) -> Option<u32> {
    text.trim().get(..4).and_then(|y| y.parse().ok())
}

/// Read duration and tag metadata from `path`.
pub fn probe(path: &Path) -> std::result::Result<Probe, lofty::error::LoftyError> {
    let tagged = lofty::read_from_path(path)?;

    let mut probe = Probe {
        duration: tagged.properties().duration().as_secs_f64(),
        ..Probe::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        probe.title = non_blank(tag.title());
        probe.artist = non_blank(tag.artist());
        probe.album = non_blank(tag.album());
        probe.genre = non_blank(tag.genre());
        probe.year = tag
            .items()
            .find(|item| matches!(item.key(), ItemKey::Year | ItemKey::RecordingDate))
            .and_then(|item| item.value().text())
            .and_then(parse_year);
        probe.cover_art = tag.pictures().first().map(|pic| CoverArt {
            mime_type: pic.mime_type().map(|m| m.as_str().to_string()),
            data: pic.data().to_vec(),
        });
    }

    Ok(probe)
}

/// Build one `Track` from a file on disk.
///
/// Fails only when the file itself is unreachable; an unreadable tag just
/// leaves the filename-derived metadata and a zero duration.
pub fn import_file(path: &Path) -> Result<Track> {
    let canonical = fs::canonicalize(path)?;
    File::open(&canonical)?;

    let stem = canonical
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let (artist, title) = parse_file_name(&stem);
    let mut track = Track::new(canonical, title, artist);

    match probe(&track.path) {
        Ok(p) => {
            track.duration = p.duration;
            if let Some(t) = p.title {
                track.title = t;
            }
            if let Some(a) = p.artist {
                track.artist = a;
            }
            track.album = p.album;
            track.genre = p.genre;
            track.year = p.year;
            track.cover_art = p.cover_art.map(Arc::new);
        }
        Err(e) => log::warn!("no metadata for {:?}: {e}", track.path),
    }

    Ok(track)
}

/// Import a whole selection. Files that fail are logged and left out; the
/// rest keep the selection order.
pub fn import_batch(paths: &[PathBuf]) -> Vec<Track> {
    let results: Vec<Option<Track>> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|p| (p, scope.spawn(move || import_file(p))))
            .collect();

        handles
            .into_iter()
            .map(|(p, h)| match h.join() {
                Ok(Ok(track)) => Some(track),
                Ok(Err(e)) => {
                    log::error!("failed to import {:?}: {e}", p);
                    None
                }
                Err(_) => {
                    log::error!("import of {:?} panicked", p);
                    None
                }
            })
            .collect()
    });

    let tracks: Vec<Track> = results.into_iter().flatten().collect();
    log::info!("imported {} of {} selected files", tracks.len(), paths.len());
    tracks
}
