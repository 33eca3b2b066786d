//! Library module: the `Track` model and the file import pipeline.

mod import;
mod model;
mod scan;

pub use import::{import_batch, parse_file_name};
pub use model::*;
pub use scan::expand_paths;

#[cfg(test)]
mod tests;
