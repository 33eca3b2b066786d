//! Global playback shortcuts.
//!
//! Only the keys that map straight onto a player action live here; keys that
//! drive the view (cursor, prompt, theme) are handled by the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::{Action, PlayerState};

/// Action for `key`, if it is a playback shortcut.
///
/// Space toggles play, left/right pick the previous/next track, up/down move
/// the volume by `volume_step` within `[0, 1]`, and `m`/`s`/`r` toggle mute,
/// shuffle and repeat (either case). Keys held with Ctrl or Alt are ignored.
pub fn player_action_for_key(
    key: &KeyEvent,
    state: &PlayerState,
    volume_step: f32,
) -> Option<Action> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let action = match key.code {
        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Left => Action::PreviousTrack,
        KeyCode::Right => Action::NextTrack,
        KeyCode::Up => Action::SetVolume((state.volume + volume_step).clamp(0.0, 1.0)),
        KeyCode::Down => Action::SetVolume((state.volume - volume_step).clamp(0.0, 1.0)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'm' => Action::ToggleMute,
            's' => Action::ToggleShuffle,
            'r' => Action::ToggleRepeat,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}
