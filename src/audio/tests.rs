use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::{AudioCmd, AudioEvent, AudioPlayer, EventKind};

fn wired() -> (AudioPlayer, Receiver<AudioCmd>, Sender<AudioEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (ev_tx, ev_rx) = mpsc::channel();
    let player = AudioPlayer::from_channels(cmd_tx, ev_rx, None, 0);
    (player, cmd_rx, ev_tx)
}

fn drain(rx: &Receiver<AudioCmd>) -> Vec<AudioCmd> {
    rx.try_iter().collect()
}

#[test]
fn commands_are_forwarded_in_order() {
    let (player, rx, _ev) = wired();
    player.load(Path::new("/music/a.flac"));
    player.play();
    player.seek(12.5);
    player.pause();

    assert_eq!(
        drain(&rx),
        vec![
            AudioCmd::Load(PathBuf::from("/music/a.flac")),
            AudioCmd::Play,
            AudioCmd::Seek(Duration::from_secs_f64(12.5)),
            AudioCmd::Pause,
        ]
    );
}

#[test]
fn volume_is_clamped_and_bad_seeks_go_to_start() {
    let (player, rx, _ev) = wired();
    player.set_volume(1.7);
    player.set_volume(-0.2);
    player.set_volume(f32::NAN);
    player.seek(-3.0);
    player.seek(f64::INFINITY);

    assert_eq!(
        drain(&rx),
        vec![
            AudioCmd::SetVolume(1.0),
            AudioCmd::SetVolume(0.0),
            AudioCmd::SetVolume(0.0),
            AudioCmd::Seek(Duration::ZERO),
            AudioCmd::Seek(Duration::ZERO),
        ]
    );
}

#[test]
fn pump_delivers_only_to_matching_listeners() {
    let (mut player, _rx, ev) = wired();
    let times = Rc::new(RefCell::new(Vec::new()));
    let ended = Rc::new(RefCell::new(0));

    let t = times.clone();
    player.on(
        EventKind::TimeUpdate,
        Box::new(move |e| {
            if let AudioEvent::TimeUpdate(s) = e {
                t.borrow_mut().push(*s);
            }
        }),
    );
    let n = ended.clone();
    player.on(EventKind::Ended, Box::new(move |_| *n.borrow_mut() += 1));

    ev.send(AudioEvent::TimeUpdate(1.0)).unwrap();
    ev.send(AudioEvent::CanPlay).unwrap();
    ev.send(AudioEvent::TimeUpdate(2.0)).unwrap();
    ev.send(AudioEvent::Ended).unwrap();

    // Nothing runs until pumped.
    assert!(times.borrow().is_empty());

    assert_eq!(player.pump(), 4);
    assert_eq!(*times.borrow(), vec![1.0, 2.0]);
    assert_eq!(*ended.borrow(), 1);

    assert_eq!(player.pump(), 0);
}

#[test]
fn off_detaches_a_single_listener() {
    let (mut player, _rx, ev) = wired();
    let hits = Rc::new(RefCell::new(0));

    let a = hits.clone();
    let first = player.on(EventKind::CanPlay, Box::new(move |_| *a.borrow_mut() += 1));
    let b = hits.clone();
    player.on(EventKind::CanPlay, Box::new(move |_| *b.borrow_mut() += 10));

    assert!(player.off(first));
    assert!(!player.off(first));
    assert_eq!(player.listener_count(), 1);

    ev.send(AudioEvent::CanPlay).unwrap();
    player.pump();
    assert_eq!(*hits.borrow(), 10);
}

#[test]
fn destroy_shuts_down_once_and_goes_quiet() {
    let (cmd_tx, rx) = mpsc::channel();
    let (_ev_tx, ev_rx) = mpsc::channel::<AudioEvent>();
    let mut player = AudioPlayer::from_channels(cmd_tx, ev_rx, None, 250);
    player.on(EventKind::Error, Box::new(|_| {}));

    player.destroy();
    player.destroy();
    player.play();

    assert!(player.is_destroyed());
    assert_eq!(player.listener_count(), 0);
    assert_eq!(drain(&rx), vec![AudioCmd::Shutdown { fade_out_ms: 250 }]);
}

#[test]
fn drop_sends_shutdown() {
    let (player, rx, _ev) = wired();
    drop(player);
    assert_eq!(drain(&rx), vec![AudioCmd::Shutdown { fade_out_ms: 0 }]);
}

#[test]
fn sends_after_the_thread_is_gone_are_ignored() {
    let (player, rx, _ev) = wired();
    drop(rx);
    player.play();
    player.set_muted(true);
}

#[test]
fn event_kind_matches_variant() {
    assert_eq!(AudioEvent::TimeUpdate(0.0).kind(), EventKind::TimeUpdate);
    assert_eq!(AudioEvent::DurationChange(3.0).kind(), EventKind::DurationChange);
    assert_eq!(AudioEvent::CanPlay.kind(), EventKind::CanPlay);
    assert_eq!(AudioEvent::Ended.kind(), EventKind::Ended);
    assert_eq!(AudioEvent::Error("x".into()).kind(), EventKind::Error);
    assert_eq!(
        AudioEvent::PlayRejected("x".into()).kind(),
        EventKind::PlayRejected
    );
}
