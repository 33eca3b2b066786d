//! Player module: the playback state machine.
//!
//! `PlayerState` is the single source of truth, `reduce` is its pure
//! transition function and `Store` is the handle everything dispatches through.
//! Albums are derived here too (`albums::organize_albums`).

mod action;
mod albums;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use albums::{Album, UNKNOWN_ALBUM, organize_albums};
pub use reducer::{reduce, reduce_with_rng};
pub use state::{PlayerState, RepeatMode};
pub use store::Store;
