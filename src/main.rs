use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::{env, io};

mod animation;
mod app;
mod audio;
mod config;
mod error;
mod favorites;
mod keys;
mod library;
mod mpris;
mod player;
mod runtime;
mod storage;
mod sync;
mod theme;
mod ui;

const LOG_FILE_NAME: &str = "spindle.log";

const USAGE: &str = "\
usage: spindle [PATH]...
       spindle --dump-config

Plays the audio files and folders given as PATH. More can be added from
inside the player with `a`.

  --dump-config   print the default configuration as TOML and exit
  -h, --help      show this help";

/// The TUI owns the terminal, so log lines go to a file in the data dir.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(data_dir: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();

    let file = data_dir.and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))
            .ok()
    });
    match file {
        Some(f) => {
            builder.target(env_logger::Target::Pipe(Box::new(f)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for arg in env::args_os().skip(1) {
        match arg.to_str() {
            Some("-h") | Some("--help") => {
                println!("{USAGE}");
                if let Some(path) = config::resolve_config_path() {
                    println!("\nconfig file: {}", path.display());
                }
                return Ok(());
            }
            Some("--dump-config") => {
                print!("{}", toml::to_string_pretty(&config::Settings::default())?);
                return Ok(());
            }
            Some(flag) if flag.starts_with("--") => {
                eprintln!("spindle: unknown option {flag}\n\n{USAGE}");
                return Err(io::Error::new(io::ErrorKind::InvalidInput, "unknown option").into());
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    let (settings, problem) = runtime::load_settings();
    init_logging(settings.data_dir().as_deref());
    log::info!("spindle {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(problem) = problem {
        log::warn!("{problem}");
    }

    runtime::run(&settings, paths)?;
    Ok(())
}
