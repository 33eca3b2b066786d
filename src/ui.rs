//! UI rendering for the terminal user interface.
//!
//! Purely presentational: reads the player state and the app model and
//! draws them with `ratatui`. Nothing here dispatches actions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Row, View};
use crate::config::{ControlsSettings, UiSettings};
use crate::favorites::FavoritesStore;
use crate::player::{PlayerState, RepeatMode};
use crate::theme::Theme;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("space", "play/pause");
    map.insert("←/→", "prev/next");
    map.insert("↑/↓", "volume");
    map.insert("j/k", "up/down");
    map.insert("enter", "play or open selected");
    map.insert("tab", "songs/albums/favorites");
    map.insert("l/h", "open/close album");
    map.insert("p", "play album");
    map.insert("0-9", "seek to n0%");
    // H/L is filled in from config.
    map.insert("m", "mute");
    map.insert("s", "shuffle");
    map.insert("r", "repeat");
    map.insert("f", "favorite");
    map.insert("a", "add path");
    map.insert("c", "clear");
    map.insert("t", "theme");
    map.insert("q", "quit");
    map
});

fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "space", "←/→", "↑/↓", "j/k", "enter", "tab", "l/h", "p", "H/L", "0-9", "m", "s", "r",
        "f", "a", "c", "t", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// `seconds` as `m:ss`. Anything that is not a finite, non-negative number
/// renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let secs = seconds.floor() as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

const DISC_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Quarter-turn glyph for a disc rotated by `degrees`.
fn disc_glyph(degrees: f64) -> &'static str {
    let quarter = (degrees.rem_euclid(360.0) / 90.0) as usize;
    DISC_FRAMES[quarter.min(DISC_FRAMES.len() - 1)]
}

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    dim: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                dim: Color::DarkGray,
            },
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                dim: Color::Gray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Rows `[start, end)` to render so `selected` stays roughly centred, and
/// the selected row's position inside that window.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn repeat_label(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::None => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);
    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn now_playing_lines<'a>(state: &'a PlayerState, palette: &Palette) -> Vec<Line<'a>> {
    let disc = Span::styled(
        disc_glyph(state.cd_rotation),
        Style::default().fg(palette.accent),
    );

    let title = match state.current_track() {
        Some(track) => {
            let mut spans = vec![
                disc,
                Span::raw(" "),
                Span::styled(
                    track.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - "),
                Span::raw(track.artist.as_str()),
            ];
            if let Some(album) = track.album.as_deref() {
                spans.push(Span::styled(
                    format!(" ({album})"),
                    Style::default().fg(palette.dim),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(vec![
            disc,
            Span::styled(" nothing loaded", Style::default().fg(palette.dim)),
        ]),
    };

    let volume = if state.is_muted {
        "muted".to_string()
    } else {
        format!("{:.0}%", state.volume * 100.0)
    };
    let flags = Line::from(format!(
        "{}  •  vol {}  •  shuffle {}  •  repeat {}",
        if state.is_playing { "playing" } else { "paused" },
        volume,
        if state.is_shuffled { "on" } else { "off" },
        repeat_label(state.repeat_mode),
    ));

    vec![title, flags]
}

fn row_item<'a>(
    row: Row,
    state: &'a PlayerState,
    favorites: &FavoritesStore,
) -> ListItem<'a> {
    match row {
        Row::Track(i) => {
            let Some(track) = state.tracks.get(i) else {
                return ListItem::new("");
            };
            let fav = if favorites.contains(&track.id) { "★" } else { " " };
            let now = if state.current_track_index == Some(i) { "▶" } else { " " };
            ListItem::new(format!(
                "{fav}{now} {}  {}",
                track.display(),
                format_time(track.duration)
            ))
        }
        Row::Album(a) => {
            let Some(album) = state.albums.get(a) else {
                return ListItem::new("");
            };
            let n = album.tracks.len();
            ListItem::new(format!(
                "{} - {} ({n} track{})",
                album.title,
                album.artist,
                if n == 1 { "" } else { "s" }
            ))
        }
    }
}

/// Title of the main list. An open album shows its header instead.
fn list_title(app: &App, state: &PlayerState) -> String {
    match app.view {
        View::Album(a) => match state.albums.get(a) {
            Some(album) => {
                let n = album.tracks.len();
                format!(
                    " {} - {} ({n} song{}) ",
                    album.title,
                    album.artist,
                    if n == 1 { "" } else { "s" }
                )
            }
            None => " album not found ".to_string(),
        },
        view => format!(" {} ", view.title().to_lowercase()),
    }
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    state: &PlayerState,
    favorites: &FavoritesStore,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header_text = if app.header_text.is_empty() {
        ui_settings.header_text.as_str()
    } else {
        app.header_text.as_str()
    };
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spindle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now_playing = Paragraph::new(now_playing_lines(state, &palette))
        .style(palette.base())
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        );
    frame.render_widget(now_playing, chunks[1]);

    let ratio = if state.duration > 0.0 && state.duration.is_finite() {
        (state.current_time / state.duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.bg))
        .ratio(ratio)
        .label(format!(
            "{} / {}",
            format_time(state.current_time),
            format_time(state.duration)
        ));
    frame.render_widget(progress, chunks[2]);

    // Main list, windowed around the cursor.
    {
        let rows = app.rows(state, favorites);
        let total = rows.len();
        let height = chunks[3].height.saturating_sub(2) as usize;
        let cursor = app.cursor.min(total.saturating_sub(1));
        let (start, end, selected) = visible_window(total, height, cursor);

        let items: Vec<ListItem> = rows[start..end]
            .iter()
            .map(|&row| row_item(row, state, favorites))
            .collect();
        let list = List::new(items)
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(list_title(app, state)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        if total > 0 {
            list_state.select(Some(selected));
        }
        frame.render_stateful_widget(list, chunks[3], &mut list_state);

        if let Some(buffer) = app.prompt.as_deref() {
            let area = centered_rect_sized(64, 3, chunks[3]);
            frame.render_widget(Clear, area);
            let prompt = Paragraph::new(format!("{buffer}▏"))
                .style(palette.base())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" add file or folder (enter adds, esc cancels) "),
                );
            frame.render_widget(prompt, area);
        }
    }

    let mut footer_lines = Vec::new();
    if let Some(status) = app.status.as_deref() {
        footer_lines.push(Line::styled(
            status.to_string(),
            Style::default().fg(palette.accent),
        ));
    }
    footer_lines.push(Line::from(controls_text(controls_settings.scrub_seconds)));
    let footer = Paragraph::new(footer_lines)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
