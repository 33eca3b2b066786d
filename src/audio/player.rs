use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, EventKind};

pub type Listener = Box<dyn FnMut(&AudioEvent)>;

/// Handle returned by [`AudioPlayer::on`], used to unregister.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// UI-side handle to the audio thread.
///
/// Commands go out over a channel; events come back on another one and are
/// handed to registered listeners only when [`AudioPlayer::pump`] is called,
/// so listeners always run on the caller's thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    next_listener: u64,
    join: Option<JoinHandle<()>>,
    fade_out_ms: u64,
    destroyed: bool,
}

impl AudioPlayer {
    pub fn spawn(settings: &AudioSettings) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let tick = Duration::from_millis(settings.tick_ms.max(1));

        let join = spawn_audio_thread(rx, event_tx, tick)
            .map_err(|e| Error::Audio(format!("failed to start audio thread: {e}")))?;

        Ok(Self::from_channels(
            tx,
            event_rx,
            Some(join),
            settings.quit_fade_out_ms,
        ))
    }

    /// Wire a player to arbitrary channels. The other ends stand in for the
    /// audio thread.
    pub(crate) fn from_channels(
        tx: Sender<AudioCmd>,
        events: Receiver<AudioEvent>,
        join: Option<JoinHandle<()>>,
        fade_out_ms: u64,
    ) -> Self {
        Self {
            tx,
            events,
            listeners: Vec::new(),
            next_listener: 0,
            join,
            fade_out_ms,
            destroyed: false,
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.tx.send(cmd) {
            log::debug!("audio thread gone, dropped {:?}", e.0);
        }
    }

    pub fn load(&self, path: &Path) {
        self.send(AudioCmd::Load(path.to_path_buf()));
    }

    pub fn play(&self) {
        self.send(AudioCmd::Play);
    }

    pub fn pause(&self) {
        self.send(AudioCmd::Pause);
    }

    /// Seek to `seconds`; negative or non-finite positions go to the start.
    pub fn seek(&self, seconds: f64) {
        let secs = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.send(AudioCmd::Seek(Duration::from_secs_f64(secs)));
    }

    pub fn set_volume(&self, volume: f32) {
        let v = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
        self.send(AudioCmd::SetVolume(v));
    }

    pub fn set_muted(&self, muted: bool) {
        self.send(AudioCmd::SetMuted(muted));
    }

    pub fn on(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind, listener));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver every event queued so far. Returns how many events were drained.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            let event = match self.events.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            delivered += 1;
            let kind = event.kind();
            for (_, k, listener) in self.listeners.iter_mut() {
                if *k == kind {
                    listener(&event);
                }
            }
        }
        delivered
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Stop playback, detach listeners and join the audio thread.
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let _ = self.tx.send(AudioCmd::Shutdown {
            fade_out_ms: self.fade_out_ms,
        });
        self.destroyed = true;
        self.listeners.clear();

        if let Some(handle) = self.join.take() {
            if handle.join().is_err() {
                log::error!("audio thread panicked");
            }
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}
