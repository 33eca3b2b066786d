use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{AudioCmd, AudioEvent};

/// Everything the audio thread owns: the output stream and at most one sink.
struct Output {
    stream: Option<OutputStream>,
    events: Sender<AudioEvent>,

    sink: Option<Sink>,
    path: Option<PathBuf>,
    // Sink positions restart at zero after a seek rebuild; this is where it started.
    offset: Duration,
    playing: bool,
    ended_reported: bool,

    volume: f32,
    muted: bool,
}

impl Output {
    fn emit(&self, event: AudioEvent) {
        let _ = self.events.send(event);
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }

    fn apply_volume(&self) {
        if let Some(s) = &self.sink {
            s.set_volume(if self.muted { 0.0 } else { self.volume });
        }
    }

    /// Swap in a fresh sink for the current path, starting at `at`.
    fn rebuild(&mut self, at: Duration) -> Result<Option<Duration>, String> {
        let Some(stream) = self.stream.as_ref() else {
            return Err("no audio output device".to_string());
        };
        let Some(path) = self.path.as_ref() else {
            return Err("no track loaded".to_string());
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let (sink, total) = create_sink_at(stream, path, at).map_err(|e| e.to_string())?;
        self.sink = Some(sink);
        self.offset = at;
        self.ended_reported = false;
        self.apply_volume();
        if self.playing {
            if let Some(s) = &self.sink {
                s.play();
            }
        }
        Ok(total)
    }

    fn load(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.playing = false;
        match self.rebuild(Duration::ZERO) {
            Ok(total) => {
                self.emit(AudioEvent::DurationChange(
                    total.map_or(0.0, |d| d.as_secs_f64()),
                ));
                self.emit(AudioEvent::TimeUpdate(0.0));
                self.emit(AudioEvent::CanPlay);
            }
            Err(reason) => {
                self.sink = None;
                self.emit(AudioEvent::Error(reason));
            }
        }
    }

    fn play(&mut self) {
        let drained = self.sink.as_ref().is_some_and(|s| s.empty());
        if self.sink.is_none() {
            self.emit(AudioEvent::PlayRejected(
                "no playable source loaded".to_string(),
            ));
            return;
        }

        self.playing = true;
        if drained {
            // Like an ended media element: play starts over.
            if let Err(reason) = self.rebuild(Duration::ZERO) {
                self.playing = false;
                self.emit(AudioEvent::PlayRejected(reason));
            }
            return;
        }
        if let Some(s) = &self.sink {
            s.play();
        }
        self.ended_reported = false;
    }

    fn pause(&mut self) {
        self.playing = false;
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn seek(&mut self, to: Duration) {
        if self.sink.is_none() {
            return;
        }
        match self.rebuild(to) {
            Ok(_) => self.emit(AudioEvent::TimeUpdate(to.as_secs_f64())),
            Err(reason) => {
                self.sink = None;
                self.emit(AudioEvent::Error(reason));
            }
        }
    }

    fn tick(&mut self) {
        let Some(s) = &self.sink else {
            return;
        };
        if !self.playing {
            return;
        }
        if s.empty() {
            if !self.ended_reported {
                self.ended_reported = true;
                self.playing = false;
                self.emit(AudioEvent::Ended);
            }
            return;
        }
        self.emit(AudioEvent::TimeUpdate(self.position().as_secs_f64()));
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(sink) = &self.sink else {
            return;
        };
        if fade_out_ms == 0 || !self.playing {
            sink.set_volume(0.0);
            return;
        }
        let start = if self.muted { 0.0 } else { self.volume };
        let steps: u64 = 20;
        let step_ms = (fade_out_ms / steps).max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            sink.set_volume(start * (1.0 - t));
            thread::sleep(Duration::from_millis(step_ms));
        }
        sink.set_volume(0.0);
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    tick: Duration,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("spindle-audio".to_string())
        .spawn(move || {
            let stream = match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    // rodio logs to stderr when OutputStream is dropped, which
                    // would scribble over the TUI.
                    stream.log_on_drop(false);
                    Some(stream)
                }
                Err(e) => {
                    log::error!("no audio output device: {e}");
                    let _ = events.send(AudioEvent::Error(format!("no audio output device: {e}")));
                    None
                }
            };

            let mut out = Output {
                stream,
                events,
                sink: None,
                path: None,
                offset: Duration::ZERO,
                playing: false,
                ended_reported: false,
                volume: 1.0,
                muted: false,
            };

            loop {
                match rx.recv_timeout(tick) {
                    Ok(cmd) => match cmd {
                        AudioCmd::Load(path) => {
                            log::debug!("loading {:?}", path);
                            out.load(path);
                        }
                        AudioCmd::Play => out.play(),
                        AudioCmd::Pause => out.pause(),
                        AudioCmd::Seek(to) => out.seek(to),
                        AudioCmd::SetVolume(v) => {
                            out.volume = v.clamp(0.0, 1.0);
                            out.apply_volume();
                        }
                        AudioCmd::SetMuted(m) => {
                            out.muted = m;
                            out.apply_volume();
                        }
                        AudioCmd::Shutdown { fade_out_ms } => {
                            out.fade_out(fade_out_ms);
                            if let Some(s) = out.sink.take() {
                                s.stop();
                            }
                            break;
                        }
                    },
                    Err(RecvTimeoutError::Timeout) => out.tick(),
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::debug!("audio thread finished");
        })
}
