//! Keeps the audio output in line with the player state.
//!
//! State flows down (which track, play intent, volume, mute) and audio events
//! flow back up as dispatched actions. Everything here runs on the UI thread:
//! events reach the sync only when [`PlaybackSync::reconcile`] pumps them.

use std::sync::mpsc::{self, Receiver};

use crate::audio::{AudioEvent, AudioPlayer, EventKind, ListenerId};
use crate::library::TrackId;
use crate::player::{Action, PlayerState, RepeatMode, Store};

/// Where playback failures are surfaced to the user.
pub trait ErrorReporter {
    fn report(&mut self, message: &str);
}

/// Reporter that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, message: &str) {
        log::error!("{message}");
    }
}

const WATCHED: [EventKind; 6] = [
    EventKind::TimeUpdate,
    EventKind::DurationChange,
    EventKind::CanPlay,
    EventKind::Ended,
    EventKind::Error,
    EventKind::PlayRejected,
];

/// Inputs of the play/pause decision; it is re-made whenever one changes.
type PlayKey = (Option<TrackId>, bool, bool);

pub struct PlaybackSync<R: ErrorReporter = LogReporter> {
    player: AudioPlayer,
    inbox: Receiver<AudioEvent>,
    listeners: Vec<ListenerId>,
    reporter: R,

    ready: bool,
    loaded: Option<TrackId>,
    play_key: Option<PlayKey>,
    volume: f32,
    muted: bool,
}

impl<R: ErrorReporter> PlaybackSync<R> {
    /// Take ownership of `player`, subscribe to its events and push the
    /// initial volume and mute state down.
    pub fn mount(mut player: AudioPlayer, state: &PlayerState, reporter: R) -> Self {
        let (tx, inbox) = mpsc::channel();
        let listeners = WATCHED
            .iter()
            .map(|&kind| {
                let tx = tx.clone();
                player.on(
                    kind,
                    Box::new(move |event: &AudioEvent| {
                        let _ = tx.send(event.clone());
                    }),
                )
            })
            .collect();

        player.set_volume(state.volume);
        player.set_muted(state.is_muted);

        Self {
            player,
            inbox,
            listeners,
            reporter,
            ready: false,
            loaded: None,
            play_key: None,
            volume: state.volume,
            muted: state.is_muted,
        }
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[cfg(test)]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Feed pending audio events into `store`, then bring the audio output
    /// in line with the resulting state.
    pub fn reconcile(&mut self, store: &mut Store) {
        if self.player.is_destroyed() {
            return;
        }
        self.player.pump();
        let pending: Vec<AudioEvent> = self.inbox.try_iter().collect();
        for event in pending {
            self.handle_event(event, store);
        }
        self.drive(store.state());
    }

    fn handle_event(&mut self, event: AudioEvent, store: &mut Store) {
        match event {
            AudioEvent::TimeUpdate(secs) => store.dispatch(Action::SetCurrentTime(secs)),
            AudioEvent::DurationChange(secs) => store.dispatch(Action::SetDuration(secs)),
            AudioEvent::CanPlay => self.ready = true,
            AudioEvent::Ended => self.on_ended(store),
            AudioEvent::Error(reason) => {
                self.ready = false;
                self.reporter.report(&format!("playback error: {reason}"));
            }
            AudioEvent::PlayRejected(reason) => {
                store.dispatch(Action::TogglePlay);
                self.reporter.report(&format!("failed to play: {reason}"));
            }
        }
    }

    fn on_ended(&mut self, store: &mut Store) {
        let state = store.state();
        if state.repeat_mode == RepeatMode::One {
            self.restart();
            return;
        }

        if state.repeat_mode == RepeatMode::All || !state.is_last_track() {
            let before = state.current_track().map(|t| t.id.clone());
            store.dispatch(Action::NextTrack);

            // A one-track playlist under repeat-all lands on the same track,
            // which the track-change path will not reload.
            let after = store.state();
            if after.is_playing && after.current_track().map(|t| &t.id) == before.as_ref() {
                self.restart();
            }
        } else {
            store.dispatch(Action::TogglePlay);
        }
    }

    fn restart(&mut self) {
        self.player.seek(0.0);
        self.player.play();
    }

    fn drive(&mut self, state: &PlayerState) {
        let current = state.current_track();
        let current_id = current.map(|t| t.id.clone());

        if current_id != self.loaded {
            match current {
                Some(track) => {
                    self.ready = false;
                    log::debug!("loading {}", track.display());
                    self.player.load(&track.path);
                }
                None => self.player.pause(),
            }
            self.loaded = current_id.clone();
        }

        let key = (current_id, state.is_playing, self.ready);
        if self.play_key.as_ref() != Some(&key) {
            let (id, playing, ready) = &key;
            if id.is_some() && *ready {
                if *playing {
                    self.player.play();
                } else {
                    self.player.pause();
                }
            }
            self.play_key = Some(key);
        }

        if state.volume != self.volume {
            self.volume = state.volume;
            self.player.set_volume(state.volume);
        }
        if state.is_muted != self.muted {
            self.muted = state.is_muted;
            self.player.set_muted(state.is_muted);
        }
    }

    pub fn seek_to(&self, seconds: f64) {
        self.player.seek(seconds);
    }

    /// Seek to `percent` (0 to 100) of the current duration. Does nothing
    /// while the duration is unknown.
    pub fn seek_by_percentage(&self, percent: f64, state: &PlayerState) {
        if state.duration > 0.0 && state.duration.is_finite() {
            self.seek_to(percent / 100.0 * state.duration);
        }
    }

    /// Detach listeners and release the audio output.
    pub fn unmount(mut self) {
        for id in self.listeners.drain(..) {
            self.player.off(id);
        }
        log::debug!(
            "sync unmounted, {} audio listeners left",
            self.player.listener_count()
        );
        self.player.destroy();
    }
}
