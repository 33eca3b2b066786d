use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_audio_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Turn a user selection (files and/or directories) into the list of audio
/// files to import.
///
/// Explicit files keep their position in the selection; a directory expands in
/// place to its audio files, sorted by path. Entries that don't exist are skipped.
pub fn expand_paths(selection: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in selection {
        if entry.is_file() {
            if has_audio_extension(entry, &exts) {
                files.push(entry.clone());
            } else {
                log::debug!("skipping non-audio file {:?}", entry);
            }
        } else if entry.is_dir() {
            files.extend(walk_dir(entry, settings, &exts));
        } else {
            log::warn!("selected path does not exist: {:?}", entry);
        }
    }

    files
}

fn walk_dir(dir: &Path, settings: &LibrarySettings, exts: &[String]) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && has_audio_extension(p, exts))
        .collect();

    found.sort();
    found
}
