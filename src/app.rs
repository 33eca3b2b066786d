//! Application module: the view model the TUI draws and the event loop edits.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
