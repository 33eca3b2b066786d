use rand::rngs::StdRng;

use crate::library::Track;

use super::action::Action;
use super::reducer::{reduce, reduce_with_rng};
use super::state::PlayerState;

/// Owner of the current `PlayerState`. Passed by `&mut` to whoever dispatches.
///
/// Dispatches are applied one at a time. Whenever a dispatch changes the
/// track list the store follows up with `OrganizeAlbums` itself.
pub struct Store {
    state: PlayerState,
    /// `None` draws shuffle picks from the thread RNG.
    rng: Option<StdRng>,
}

impl Store {
    pub fn new(state: PlayerState) -> Self {
        Self {
            state,
            rng: None,
        }
    }

    /// A store whose shuffle picks are reproducible.
    #[cfg(test)]
    pub fn seeded(state: PlayerState, seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            state,
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {:?}", ActionName(&action));

        let next = self.apply(action);
        let tracks_changed = !same_tracks(&self.state.tracks, &next.tracks);
        self.state = next;

        if tracks_changed {
            self.state = self.apply(Action::OrganizeAlbums);
        }
    }

    fn apply(&mut self, action: Action) -> PlayerState {
        match self.rng.as_mut() {
            Some(rng) => reduce_with_rng(&self.state, action, rng),
            None => reduce(&self.state, action),
        }
    }
}

fn same_tracks(a: &[Track], b: &[Track]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Debug view of an action that doesn't dump whole track batches into the log.
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::AddTracks(batch) => write!(f, "AddTracks({} tracks)", batch.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
