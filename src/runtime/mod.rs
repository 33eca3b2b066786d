use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::config;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::mpris::ControlCmd;
use crate::player::{PlayerState, Store};
use crate::storage::KeyValueStore;
use crate::sync::PlaybackSync;
use crate::theme::ThemeStore;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub use settings::load_settings;

/// Where favorites and the theme live when no data directory can be found.
fn data_dir(settings: &config::Settings) -> PathBuf {
    settings
        .data_dir()
        .unwrap_or_else(|| PathBuf::from(".spindle"))
}

pub fn run(settings: &config::Settings, selection: Vec<PathBuf>) -> Result<()> {
    let kv = KeyValueStore::in_dir(&data_dir(settings));
    log::debug!("persisting to {}", kv.path().display());
    let favorites = FavoritesStore::load(kv.clone());
    let themes = ThemeStore::load(kv);

    let mut store = Store::new(PlayerState::with_settings(
        settings.audio.initial_volume,
        &settings.playback,
    ));
    let imported = startup::import_paths(&mut store, &selection, &settings.library);
    log::info!("starting with {imported} tracks");

    let player = AudioPlayer::spawn(&settings.audio)?;
    let (status_tx, status_rx) = mpsc::channel::<String>();
    let sync = PlaybackSync::mount(
        player,
        store.state(),
        startup::StatusReporter::new(status_tx),
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    let mut app = App::new(themes.theme(), settings.ui.header_text.clone());
    if imported > 0 {
        app.set_status(format!("loaded {imported} tracks"));
    }

    let mut session = event_loop::Session {
        settings,
        store,
        app,
        sync,
        favorites,
        themes,
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &mut session,
        &mpris,
        &control_rx,
        &status_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.sync.unmount();
    log::info!("bye");

    run_result
}
