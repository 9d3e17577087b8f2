use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "songs.json";

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub data_file: PathBuf,
    pub probe_seed: Option<u32>,
    pub log_level: LevelFilter,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();

    let data_file = std::env::var("MUSIC_CATALOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

    let probe_seed = match std::env::var("MUSIC_CATALOG_SEED") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u32>()
                .with_context(|| format!("MUSIC_CATALOG_SEED is not a valid u32: '{raw}'"))?,
        ),
        Err(_) => None,
    };

    let log_level = match std::env::var("MUSIC_CATALOG_LOG") {
        Ok(raw) => raw
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("MUSIC_CATALOG_LOG is not a log level: '{raw}'"))?,
        Err(_) => LevelFilter::Info,
    };

    Ok(Config {
        data_file,
        probe_seed,
        log_level,
    })
}
