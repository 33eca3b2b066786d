//! The player's transition function.
//!
//! `reduce` never mutates its input and never fails. Indices handed to
//! `PlayTrack` are trusted; it is the caller's job to keep them in range.

use std::collections::HashSet;

use rand::Rng;

use super::action::Action;
use super::albums::organize_albums;
use super::state::PlayerState;

/// Apply `action` to `state`, drawing shuffle picks from the thread RNG.
pub fn reduce(state: &PlayerState, action: Action) -> PlayerState {
    reduce_with_rng(state, action, &mut rand::thread_rng())
}

/// Apply `action` to `state` with an explicit RNG for shuffle picks.
pub fn reduce_with_rng<R: Rng + ?Sized>(
    state: &PlayerState,
    action: Action,
    rng: &mut R,
) -> PlayerState {
    let mut next = state.clone();

    match action {
        Action::AddTracks(incoming) => {
            let mut seen: HashSet<_> = next.tracks.iter().map(|t| t.id.clone()).collect();
            let fresh: Vec<_> = incoming
                .into_iter()
                .filter(|t| seen.insert(t.id.clone()))
                .collect();

            if next.current_track_index.is_none() && !fresh.is_empty() {
                next.current_track_index = Some(0);
            }
            next.tracks.extend(fresh);
        }

        Action::PlayTrack(index) => {
            next.current_track_index = Some(index);
            next.is_playing = true;
        }

        Action::TogglePlay => next.is_playing = !next.is_playing,

        Action::SetCurrentTime(secs) => next.current_time = secs,

        Action::SetDuration(secs) => next.duration = secs,

        Action::SetVolume(volume) => {
            next.volume = volume;
            // Only ever sets mute; a later non-zero volume leaves it alone.
            if volume == 0.0 {
                next.is_muted = true;
            }
        }

        Action::ToggleMute => next.is_muted = !next.is_muted,

        Action::NextTrack => {
            if let Some(current) = next.current_track_index {
                let len = next.tracks.len();
                if len > 0 {
                    let target = if next.is_shuffled {
                        random_other_index(current, len, rng)
                    } else {
                        (current + 1) % len
                    };
                    next.current_track_index = Some(target);
                    next.is_playing = true;
                }
            }
        }

        Action::PreviousTrack => {
            if let Some(current) = next.current_track_index {
                let len = next.tracks.len();
                if len > 0 {
                    let target = if next.is_shuffled {
                        random_other_index(current, len, rng)
                    } else {
                        (current + len - 1) % len
                    };
                    next.current_track_index = Some(target);
                    next.is_playing = true;
                }
            }
        }

        Action::ToggleShuffle => next.is_shuffled = !next.is_shuffled,

        Action::ToggleRepeat => next.repeat_mode = next.repeat_mode.cycle(),

        Action::ClearPlaylist => {
            next.tracks.clear();
            next.albums.clear();
            next.current_track_index = None;
            next.is_playing = false;
            next.current_time = 0.0;
            next.duration = 0.0;
        }

        Action::UpdateRotation(degrees) => next.cd_rotation = wrap_degrees(degrees),

        Action::OrganizeAlbums => next.albums = organize_albums(&next.tracks),
    }

    next
}

/// `degrees` folded into `[0, 360)`.
fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Uniform pick among `0..len` excluding `current`.
///
/// With a single track there is nothing else to pick, so it stays put.
fn random_other_index<R: Rng + ?Sized>(current: usize, len: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return current.min(len.saturating_sub(1));
    }
    let pick = rng.gen_range(0..len - 1);
    if pick >= current { pick + 1 } else { pick }
}
