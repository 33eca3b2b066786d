use crate::library::TrackId;
use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::player::PlayerState;

/// Track, status and the bits of the effective volume.
type Shown = (Option<TrackId>, PlaybackStatus, u32);

/// Pushes player state to MPRIS only when what it shows actually changed.
#[derive(Default)]
pub struct MprisSync {
    last: Option<Shown>,
}

impl MprisSync {
    /// Returns whether the handle was updated.
    pub fn refresh(&mut self, mpris: &MprisHandle, state: &PlayerState) -> bool {
        let key = (
            state.current_track().map(|t| t.id.clone()),
            PlaybackStatus::of(state),
            state.effective_volume().to_bits(),
        );
        if self.last.as_ref() == Some(&key) {
            return false;
        }
        mpris.update(state);
        self.last = Some(key);
        true
    }
}
