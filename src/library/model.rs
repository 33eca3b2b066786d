use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Artist used when neither tags nor the file name name one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Opaque, stable track identity.
///
/// Derived from the file's canonical path, so a favorite survives restarts
/// and importing the same file twice yields the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn for_path(path: &Path) -> Self {
        let key = path.to_string_lossy();
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Embedded picture pulled from the file's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// One imported audio file. Never mutated after import.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    /// Where the audio data lives; also the locator handed to the audio thread.
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    /// Seconds; 0 when the file could not be probed.
    pub duration: f64,
    pub cover_art: Option<Arc<CoverArt>>,
}

impl Track {
    /// A bare track for `path`, with no tag data.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: TrackId::for_path(&path),
            path,
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            year: None,
            duration: 0.0,
            cover_art: None,
        }
    }

    /// `Artist - Title`, as shown in lists.
    pub fn display(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// `file://` URL of the playable resource.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
