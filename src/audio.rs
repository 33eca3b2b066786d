//! Playback resource: a dedicated thread owning the `rodio` output, and the
//! [`AudioPlayer`] handle the rest of the program talks to.

mod player;
mod sink;
mod thread;
mod types;

pub use player::{AudioPlayer, Listener, ListenerId};
pub use types::{AudioCmd, AudioEvent, EventKind};

#[cfg(test)]
mod tests;
