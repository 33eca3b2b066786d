use crate::error::Result;
use crate::library::TrackId;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Persisted, ordered set of favorite track ids.
///
/// Stored as a JSON array under [`FAVORITES_KEY`]. A value that does not
/// parse is logged and read as no favorites.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    kv: KeyValueStore,
    ids: Vec<TrackId>,
}

impl FavoritesStore {
    pub fn load(kv: KeyValueStore) -> Self {
        let ids = match kv.get(FAVORITES_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<TrackId>>(&raw) {
                Ok(mut ids) => {
                    dedup_in_order(&mut ids);
                    ids
                }
                Err(e) => {
                    log::warn!("ignoring unreadable favorites: {e}");
                    Vec::new()
                }
            },
        };
        Self { kv, ids }
    }

    #[cfg(test)]
    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    /// Add `id` if absent, remove it if present, then persist.
    /// Returns whether `id` is a favorite afterwards.
    pub fn toggle(&mut self, id: &TrackId) -> Result<bool> {
        let now_favorite = match self.ids.iter().position(|x| x == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id.clone());
                true
            }
        };
        self.kv
            .set(FAVORITES_KEY, &serde_json::to_string(&self.ids)?)?;
        Ok(now_favorite)
    }
}

fn dedup_in_order(ids: &mut Vec<TrackId>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
