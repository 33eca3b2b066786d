//! MPRIS D-Bus service so media keys and `playerctl` can drive the player.
//!
//! The service runs on its own thread and only ever sends [`ControlCmd`]s
//! back to the event loop; what it exposes is a snapshot the event loop
//! pushes in through [`MprisHandle::update`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::library::Track;
use crate::player::PlayerState;

pub const BUS_NAME: &str = "org.mpris.MediaPlayer2.spindle";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn of(state: &PlayerState) -> Self {
        match (state.current_track(), state.is_playing) {
            (None, _) => Self::Stopped,
            (Some(_), true) => Self::Playing,
            (Some(_), false) => Self::Paused,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackStatus,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
    volume: f64,
}

/// D-Bus object path naming `track`. Object paths only allow `[A-Za-z0-9_]`
/// per element, so the id's dashes become underscores.
fn track_object_path(track: &Track) -> Option<OwnedObjectPath> {
    let element: String = track
        .id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    ObjectPath::try_from(format!("/org/spindle/track/t{element}"))
        .ok()
        .map(OwnedObjectPath::from)
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// A handle with no bus service behind it.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
        }
    }

    #[cfg(test)]
    pub fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    /// Refresh what the bus sees from the player state.
    pub fn update(&self, state: &PlayerState) {
        self.set_track_metadata(state.current_track());
        self.set_playback(PlaybackStatus::of(state));
        if let Ok(mut s) = self.state.lock() {
            s.volume = f64::from(state.effective_volume());
        }
    }

    pub fn set_playback(&self, playback: PlaybackStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_track_metadata(&self, track: Option<&Track>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        match track {
            Some(t) => {
                s.title = Some(t.title.clone());
                s.artist = vec![t.artist.clone()];
                s.album = t.album.clone();
                s.url = Some(t.url());
                s.length_micros = (t.duration.is_finite() && t.duration > 0.0)
                    .then(|| (t.duration * 1_000_000.0).round() as i64);
                s.track_id = track_object_path(t);
            }
            None => {
                let (playback, volume) = (s.playback, s.volume);
                *s = SharedState {
                    playback,
                    volume,
                    ..SharedState::default()
                };
            }
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "spindle"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        self.state
            .lock()
            .map(|s| s.playback.as_str())
            .unwrap_or("Stopped")
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        put(
            "mpris:trackid",
            s.track_id
                .clone()
                .and_then(|p| owned(Value::from(p.into_inner()))),
        );
        put("xesam:title", s.title.clone().and_then(|t| owned(Value::from(t))));
        if !s.artist.is_empty() {
            put("xesam:artist", owned(Value::from(s.artist.clone())));
        }
        put("xesam:album", s.album.clone().and_then(|a| owned(Value::from(a))));
        put("xesam:url", s.url.clone().and_then(|u| owned(Value::from(u))));
        put("mpris:length", s.length_micros.and_then(|l| owned(Value::from(l))));

        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let state_for_thread = state.clone();

    let spawned = std::thread::Builder::new()
        .name("spindle-mpris".to_string())
        .spawn(move || {
            block_on(async move {
                let connection = match Connection::session().await {
                    Ok(c) => c,
                    Err(e) => {
                        log::warn!("MPRIS: failed to connect to session bus: {e}");
                        return;
                    }
                };

                if let Err(e) = connection.request_name(BUS_NAME).await {
                    log::warn!("MPRIS: failed to acquire name: {e}");
                    return;
                }

                let object_server = connection.object_server();

                if let Err(e) = object_server
                    .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                    .await
                {
                    log::warn!("MPRIS: failed to register root iface: {e}");
                    return;
                }

                if let Err(e) = object_server
                    .at(
                        OBJECT_PATH,
                        PlayerIface {
                            tx,
                            state: state_for_thread,
                        },
                    )
                    .await
                {
                    log::warn!("MPRIS: failed to register player iface: {e}");
                    return;
                }
                log::info!("MPRIS: serving {BUS_NAME}");

                // Keep the service alive.
                loop {
                    Timer::after(std::time::Duration::from_secs(3600)).await;
                }
            });
        });
    if let Err(e) = spawned {
        log::warn!("MPRIS: failed to start service thread: {e}");
    }

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
