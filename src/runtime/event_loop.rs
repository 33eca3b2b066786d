use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::animation::RotationAnimator;
use crate::app::App;
use crate::config;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::keys::player_action_for_key;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{Action, PlayerState, Store};
use crate::runtime::mpris_sync::MprisSync;
use crate::runtime::startup::import_paths;
use crate::sync::{ErrorReporter, PlaybackSync};
use crate::theme::ThemeStore;
use crate::ui;

/// Roughly 30 frames a second for the disc and progress bar.
const FRAME: Duration = Duration::from_millis(33);

/// Everything the loop mutates in response to input.
pub struct Session<'a, R: ErrorReporter> {
    pub settings: &'a config::Settings,
    pub store: Store,
    pub app: App,
    pub sync: PlaybackSync<R>,
    pub favorites: FavoritesStore,
    pub themes: ThemeStore,
}

/// Main terminal event loop: reconciles audio, animates, draws and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run<R: ErrorReporter>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session<'_, R>,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
    status_rx: &Receiver<String>,
) -> Result<()> {
    let mut animator = RotationAnimator::new(session.settings.ui.rotation_deg_per_ms);
    let mut mpris_sync = MprisSync::default();

    loop {
        session.sync.reconcile(&mut session.store);

        while let Ok(message) = status_rx.try_recv() {
            session.app.set_status(message);
        }

        if let Some(action) = animator.tick(Instant::now(), session.store.state()) {
            session.store.dispatch(action);
        }

        mpris_sync.refresh(mpris, session.store.state());

        let rows = session
            .app
            .rows(session.store.state(), &session.favorites)
            .len();
        session.app.clamp_cursor(rows);

        terminal.draw(|f| {
            ui::draw(
                f,
                &session.app,
                session.store.state(),
                &session.favorites,
                &session.settings.ui,
                &session.settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, session) {
                return Ok(());
            }
        }

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, session) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// What a media-key command means for the player.
fn control_action(cmd: &ControlCmd, state: &PlayerState) -> Option<Action> {
    let has_track = state.current_track().is_some();
    match cmd {
        ControlCmd::Quit => None,
        ControlCmd::Play => (has_track && !state.is_playing).then_some(Action::TogglePlay),
        ControlCmd::Pause | ControlCmd::Stop => state.is_playing.then_some(Action::TogglePlay),
        ControlCmd::PlayPause => has_track.then_some(Action::TogglePlay),
        ControlCmd::Next => Some(Action::NextTrack),
        ControlCmd::Prev => Some(Action::PreviousTrack),
    }
}

/// Returns true when the app should quit.
fn handle_control_cmd<R: ErrorReporter>(cmd: ControlCmd, session: &mut Session<'_, R>) -> bool {
    log::debug!("control command {cmd:?}");
    if cmd == ControlCmd::Quit {
        return true;
    }
    if let Some(action) = control_action(&cmd, session.store.state()) {
        session.store.dispatch(action);
    }
    if cmd == ControlCmd::Stop {
        session.sync.seek_to(0.0);
    }
    false
}

/// Returns true when the app should quit.
fn handle_key_event<R: ErrorReporter>(key: KeyEvent, session: &mut Session<'_, R>) -> bool {
    if session.app.is_prompting() {
        handle_prompt_key(key, session);
        return false;
    }

    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('q') if plain => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('t') if plain => match session.themes.toggle() {
            Ok(theme) => {
                session.app.theme = theme;
                session.app.clear_status();
            }
            Err(e) => {
                session.app.theme = session.themes.theme();
                log::warn!("failed to save theme: {e}");
                session.app.set_status(format!("theme not saved: {e}"));
            }
        },
        KeyCode::Char('f') if plain => toggle_favorite(session),
        KeyCode::Char('a') if plain => session.app.open_prompt(),
        KeyCode::Char('c') if plain => {
            session.store.dispatch(Action::ClearPlaylist);
            session.app.cursor = 0;
            session.app.set_status("playlist cleared");
        }
        KeyCode::Enter => {
            if let Some(action) = session
                .app
                .activate(session.store.state(), &session.favorites)
            {
                session.store.dispatch(action);
            }
        }
        KeyCode::Char('l') if plain => {
            session
                .app
                .open_selected_album(session.store.state(), &session.favorites);
        }
        KeyCode::Esc | KeyCode::Char('h') if plain => {
            session.app.close_album();
        }
        KeyCode::Char('p') if plain => {
            if let Some(action) = session.app.play_album(session.store.state()) {
                session.store.dispatch(action);
            }
        }
        KeyCode::Char(d @ '0'..='9') if plain => {
            if let Some(tenths) = d.to_digit(10) {
                session
                    .sync
                    .seek_by_percentage(f64::from(tenths * 10), session.store.state());
            }
        }
        KeyCode::Char('j') if plain => {
            let len = session
                .app
                .rows(session.store.state(), &session.favorites)
                .len();
            session.app.move_down(len);
        }
        KeyCode::Char('k') if plain => session.app.move_up(),
        KeyCode::Tab => session.app.cycle_view(),
        KeyCode::Char('L') => scrub(session, 1.0),
        KeyCode::Char('H') => scrub(session, -1.0),
        _ => {
            let step = session.settings.controls.volume_step;
            if let Some(action) = player_action_for_key(&key, session.store.state(), step) {
                session.store.dispatch(action);
            }
        }
    }
    false
}

fn handle_prompt_key<R: ErrorReporter>(key: KeyEvent, session: &mut Session<'_, R>) {
    match key.code {
        KeyCode::Esc => session.app.cancel_prompt(),
        KeyCode::Backspace => session.app.pop_prompt_char(),
        KeyCode::Enter => {
            let Some(path) = session.app.submit_prompt() else {
                return;
            };
            let added = import_paths(
                &mut session.store,
                std::slice::from_ref(&path),
                &session.settings.library,
            );
            let message = match added {
                0 => format!("nothing new in {}", path.display()),
                1 => "added 1 track".to_string(),
                n => format!("added {n} tracks"),
            };
            session.app.set_status(message);
        }
        KeyCode::Char(c) if !c.is_control() => session.app.push_prompt_char(c),
        _ => {}
    }
}

fn toggle_favorite<R: ErrorReporter>(session: &mut Session<'_, R>) {
    let Some(id) = session
        .app
        .target_track(session.store.state(), &session.favorites)
        .map(|t| t.id.clone())
    else {
        return;
    };
    match session.favorites.toggle(&id) {
        Ok(true) => session.app.set_status("added to favorites"),
        Ok(false) => session.app.set_status("removed from favorites"),
        Err(e) => {
            log::warn!("failed to save favorites: {e}");
            session.app.set_status(format!("favorites not saved: {e}"));
        }
    }
}

fn scrub<R: ErrorReporter>(session: &mut Session<'_, R>, direction: f64) {
    let state = session.store.state();
    if state.current_track().is_none() {
        return;
    }
    let step = session.settings.controls.scrub_seconds as f64;
    let mut target = (state.current_time + direction * step).max(0.0);
    if state.duration > 0.0 {
        target = target.min(state.duration);
    }
    session.sync.seek_to(target);
}
