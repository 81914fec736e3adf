//! Startup wiring: logging, settings, the initial scan and the shell loop.

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::backend::RodioBackend;
use crate::config::{RepeatSetting, Settings};
use crate::library::scan;
use crate::player::{PlayerSession, RepeatMode};

mod settings;
mod shell;

pub fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging()?;
    let settings = settings::load_settings();

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_music_dir);

    let (backend, events) = RodioBackend::spawn();
    let mut session = PlayerSession::new(backend);
    apply_playback_defaults(&mut session, &settings);

    let files = scan(&dir, &settings.library);
    let added = session.add_files(files);
    info!("{added} tracks from {}", dir.display());

    shell::run(&mut session, &events, &settings);

    session.backend().shutdown();
    Ok(())
}

fn apply_playback_defaults(session: &mut PlayerSession<RodioBackend>, settings: &Settings) {
    session.set_volume(settings.playback.volume as f32);
    if settings.playback.shuffle {
        session.toggle_shuffle();
    }
    session.set_repeat(match settings.playback.repeat {
        RepeatSetting::Off => RepeatMode::Off,
        RepeatSetting::All => RepeatMode::All,
        RepeatSetting::One => RepeatMode::One,
    });
}

/// `~/Music` when it exists, the current directory otherwise.
fn default_music_dir() -> PathBuf {
    env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Music"))
        .filter(|p| p.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adagio=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()?;
    Ok(())
}
