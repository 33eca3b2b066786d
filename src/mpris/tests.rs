use super::*;
use std::sync::mpsc;

use crate::player::{Action, Store};

fn make_track() -> Track {
    let mut t = Track::new("/tmp/music/test.mp3", "Test Title", "Test Artist");
    t.album = Some("Test Album".to_string());
    t.duration = 1.234567;
    t
}

fn handle() -> (MprisHandle, Arc<Mutex<SharedState>>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    (
        MprisHandle {
            state: state.clone(),
        },
        state,
    )
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let (handle, state) = handle();
    handle.set_playback(PlaybackStatus::Paused);

    let track = make_track();
    handle.set_track_metadata(Some(&track));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test Album"));
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        let path = s.track_id.as_ref().unwrap().as_str().to_string();
        assert!(path.starts_with("/org/spindle/track/t"));
        assert!(!path.contains('-'));
    }

    handle.set_track_metadata(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
        assert_eq!(s.playback, PlaybackStatus::Paused);
    }
}

#[test]
fn unknown_length_is_omitted() {
    let (handle, state) = handle();
    let track = Track::new("/tmp/a.ogg", "A", "B");
    handle.set_track_metadata(Some(&track));
    assert_eq!(state.lock().unwrap().length_micros, None);
}

#[test]
fn status_follows_player_state() {
    let mut store = Store::new(PlayerState::default());
    assert_eq!(PlaybackStatus::of(store.state()), PlaybackStatus::Stopped);

    store.dispatch(Action::AddTracks(vec![make_track()]));
    assert_eq!(PlaybackStatus::of(store.state()), PlaybackStatus::Paused);

    store.dispatch(Action::TogglePlay);
    assert_eq!(PlaybackStatus::of(store.state()), PlaybackStatus::Playing);

    let (handle, state) = handle();
    handle.update(store.state());
    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackStatus::Playing);
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert!((s.volume - 0.8).abs() < 1e-6);
    }

    store.dispatch(Action::ToggleMute);
    handle.update(store.state());
    assert_eq!(state.lock().unwrap().volume, 0.0);
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = PlaybackStatus::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = PlaybackStatus::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx: tx.clone(), state };
    let root = RootIface { tx };

    iface.next();
    iface.previous();
    iface.play_pause();
    iface.stop();
    root.quit();

    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
            ControlCmd::Quit,
        ]
    );
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    let handle = MprisHandle {
        state: state.clone(),
    };

    assert!(iface.metadata().is_empty());

    handle.set_track_metadata(Some(&make_track()));
    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}
