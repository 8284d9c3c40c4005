use log::{LevelFilter, error, info};
use notefall::app::{App, RunOptions};
use notefall::config::{APP_NAME, CUSTOM_SONGS_PATH, SETTINGS_INI_PATH};
use notefall::game::judgment::Grade;
use notefall::game::{profile, song};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .filter_module("notefall::game::chart", LevelFilter::Debug)
        .filter_module("notefall::screens", LevelFilter::Debug)
        .filter_module("notefall::core::audio", LevelFilter::Info)
        .init();

    info!("{} starting...", APP_NAME);

    let options = RunOptions::from_args(std::env::args().skip(1))?;
    let settings = profile::load(Path::new(SETTINGS_INI_PATH));

    // --- Song Catalog ---
    let mut songs = song::builtin_catalog()?;
    match song::load_custom_songs(Path::new(CUSTOM_SONGS_PATH)) {
        Ok(custom) => songs.extend(custom.into_iter().map(Arc::new)),
        Err(e) => {
            error!("Failed to load custom songs from '{}': {}", CUSTOM_SONGS_PATH, e);
            return Err(e);
        }
    }
    for (index, song) in songs.iter().enumerate() {
        info!(
            "  [{}] {} ({:.0} BPM, {})",
            index,
            song.name,
            song.bpm,
            song.formatted_length()
        );
    }

    // --- Run ---
    let results = match App::new(settings, songs, options).run() {
        Ok(results) => results,
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e);
        }
    };

    println!(
        "{} [{}]: score {}, max combo {}, accuracy {:.2}% (P {} / Gr {} / Go {} / M {})",
        results.song_name,
        results.difficulty,
        results.scores.score,
        results.scores.max_combo,
        results.scores.accuracy(),
        results.scores.count(Grade::Perfect),
        results.scores.count(Grade::Great),
        results.scores.count(Grade::Good),
        results.scores.count(Grade::Miss)
    );
    info!("Exited gracefully.");
    Ok(())
}
