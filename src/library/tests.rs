use super::import::import_file;
use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn parse_file_name_splits_artist_and_title() {
    assert_eq!(
        parse_file_name("Daft Punk - One More Time"),
        ("Daft Punk".to_string(), "One More Time".to_string())
    );
    assert_eq!(
        parse_file_name("AC-DC - Back in Black"),
        ("AC-DC".to_string(), "Back in Black".to_string())
    );
    assert_eq!(
        parse_file_name("Artist-Title"),
        ("Artist".to_string(), "Title".to_string())
    );
}

#[test]
fn parse_file_name_without_dash_uses_unknown_artist() {
    assert_eq!(
        parse_file_name("Untitled Demo"),
        (UNKNOWN_ARTIST.to_string(), "Untitled Demo".to_string())
    );
    assert_eq!(
        parse_file_name("-leading"),
        (UNKNOWN_ARTIST.to_string(), "-leading".to_string())
    );
    assert_eq!(
        parse_file_name("trailing - "),
        (UNKNOWN_ARTIST.to_string(), "trailing - ".to_string())
    );
}

#[test]
fn import_file_falls_back_to_file_name_when_unprobeable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Nina Simone - Sinnerman.mp3");
    fs::write(&path, b"definitely not an mp3").unwrap();

    let track = import_file(&path).unwrap();
    assert_eq!(track.artist, "Nina Simone");
    assert_eq!(track.title, "Sinnerman");
    assert_eq!(track.album, None);
    assert_eq!(track.duration, 0.0);
    assert!(track.path.is_absolute());
}

#[test]
fn import_batch_drops_failures_and_keeps_selection_order() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("b - second.mp3");
    let b = dir.path().join("a - first.mp3");
    fs::write(&a, b"x").unwrap();
    fs::write(&b, b"x").unwrap();

    let tracks = import_batch(&[a, dir.path().join("gone.mp3"), b]);
    let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[test]
fn track_ids_are_stable_per_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.mp3");
    fs::write(&path, b"x").unwrap();

    let first = import_file(&path).unwrap();
    let again = import_file(&path).unwrap();
    assert_eq!(first.id, again.id);

    let other = dir.path().join("y.mp3");
    fs::write(&other, b"x").unwrap();
    assert_ne!(first.id, import_file(&other).unwrap().id);
}

#[test]
fn track_display_and_url() {
    let t = Track::new("/music/x.mp3", "Song", "Band");
    assert_eq!(t.display(), "Band - Song");
    assert_eq!(t.url(), "file:///music/x.mp3");
}
