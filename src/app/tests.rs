use std::path::PathBuf;

use tempfile::tempdir;

use super::*;
use crate::favorites::FavoritesStore;
use crate::library::Track;
use crate::player::{Action, PlayerState, Store};
use crate::storage::KeyValueStore;
use crate::theme::Theme;

fn t(name: &str, album: Option<&str>) -> Track {
    let mut track = Track::new(format!("/music/{name}.mp3"), name, "Band");
    track.album = album.map(str::to_string);
    track
}

fn loaded() -> PlayerState {
    let mut store = Store::new(PlayerState::default());
    store.dispatch(Action::AddTracks(vec![
        t("one", Some("B")),
        t("two", Some("A")),
        t("three", Some("B")),
    ]));
    store.state().clone()
}

fn no_favorites() -> (tempfile::TempDir, FavoritesStore) {
    let dir = tempdir().unwrap();
    let favs = FavoritesStore::load(KeyValueStore::in_dir(dir.path()));
    (dir, favs)
}

#[test]
fn view_cycles_and_resets_cursor() {
    let mut app = App::new(Theme::Light, "spindle");
    app.cursor = 2;
    app.cycle_view();
    assert_eq!(app.view, View::Albums);
    assert_eq!(app.cursor, 0);
    app.cycle_view();
    assert_eq!(app.view, View::Favorites);
    app.cycle_view();
    assert_eq!(app.view, View::Songs);
}

#[test]
fn rows_follow_the_view() {
    let state = loaded();
    let (_dir, mut favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");

    assert_eq!(
        app.rows(&state, &favs),
        vec![Row::Track(0), Row::Track(1), Row::Track(2)]
    );

    app.view = View::Albums;
    assert_eq!(app.rows(&state, &favs), vec![Row::Album(0), Row::Album(1)]);

    app.view = View::Favorites;
    assert!(app.rows(&state, &favs).is_empty());
    favs.toggle(&state.tracks[2].id).unwrap();
    assert_eq!(app.rows(&state, &favs), vec![Row::Track(2)]);
}

#[test]
fn enter_on_album_opens_it() {
    let state = loaded();
    let (_dir, favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");
    app.view = View::Albums;
    app.cursor = 1;

    assert_eq!(app.activate(&state, &favs), None);
    assert_eq!(app.view, View::Album(1));
    assert_eq!(app.cursor, 0);
}

#[test]
fn album_rows_point_into_the_playlist() {
    let state = loaded();
    let (_dir, favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");

    // Album "B" holds "one" and "three".
    app.open_album(0);
    assert_eq!(app.rows(&state, &favs), vec![Row::Track(0), Row::Track(2)]);
    app.cursor = 1;
    assert_eq!(app.activate(&state, &favs), Some(Action::PlayTrack(2)));
    assert_eq!(app.play_album(&state), Some(Action::PlayTrack(0)));

    app.open_album(1);
    assert_eq!(app.rows(&state, &favs), vec![Row::Track(1)]);
    assert_eq!(app.play_album(&state), Some(Action::PlayTrack(1)));

    app.open_album(9);
    assert!(app.rows(&state, &favs).is_empty());
    assert_eq!(app.play_album(&state), None);
}

#[test]
fn leaving_an_album_returns_to_it_in_the_list() {
    let state = loaded();
    let (_dir, favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");

    assert!(!app.close_album());
    assert_eq!(app.view, View::Songs);
    assert_eq!(app.play_album(&state), None);

    app.view = View::Albums;
    app.cursor = 1;
    assert!(app.open_selected_album(&state, &favs));
    assert!(app.close_album());
    assert_eq!(app.view, View::Albums);
    assert_eq!(app.cursor, 1);

    app.view = View::Songs;
    assert!(!app.open_selected_album(&state, &favs));
    assert_eq!(app.view, View::Songs);

    app.open_album(0);
    app.cycle_view();
    assert_eq!(app.view, View::Favorites);
}

#[test]
fn enter_on_song_plays_it_and_empty_list_does_nothing() {
    let state = loaded();
    let (_dir, favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");
    app.cursor = 2;
    assert_eq!(app.activate(&state, &favs), Some(Action::PlayTrack(2)));

    let empty = PlayerState::default();
    app.cursor = 0;
    assert_eq!(app.activate(&empty, &favs), None);
}

#[test]
fn target_track_falls_back_to_current_on_albums() {
    let mut state = loaded();
    state.current_track_index = Some(1);
    let (_dir, favs) = no_favorites();
    let mut app = App::new(Theme::Light, "");

    app.cursor = 2;
    assert_eq!(app.target_track(&state, &favs).map(|t| t.title.as_str()), Some("three"));

    app.view = View::Albums;
    assert_eq!(app.target_track(&state, &favs).map(|t| t.title.as_str()), Some("two"));
}

#[test]
fn cursor_stays_in_range() {
    let mut app = App::new(Theme::Light, "");
    app.move_up();
    assert_eq!(app.cursor, 0);

    app.move_down(2);
    app.move_down(2);
    assert_eq!(app.cursor, 1);

    app.move_down(0);
    assert_eq!(app.cursor, 1);

    app.clamp_cursor(0);
    assert_eq!(app.cursor, 0);
    app.cursor = 7;
    app.clamp_cursor(3);
    assert_eq!(app.cursor, 2);
}

#[test]
fn prompt_edit_and_submit() {
    let mut app = App::new(Theme::Dark, "");
    assert!(!app.is_prompting());
    app.push_prompt_char('x');
    assert_eq!(app.prompt, None);

    app.open_prompt();
    for c in " /tmp/musicx".chars() {
        app.push_prompt_char(c);
    }
    app.pop_prompt_char();
    assert!(app.is_prompting());
    assert_eq!(app.submit_prompt(), Some(PathBuf::from("/tmp/music")));
    assert!(!app.is_prompting());

    app.open_prompt();
    app.push_prompt_char(' ');
    assert_eq!(app.submit_prompt(), None);

    app.open_prompt();
    app.cancel_prompt();
    assert_eq!(app.submit_prompt(), None);
}

#[test]
fn status_line() {
    let mut app = App::new(Theme::Light, "");
    app.set_status("added 3 tracks");
    assert_eq!(app.status.as_deref(), Some("added 3 tracks"));
    app.clear_status();
    assert_eq!(app.status, None);
}
