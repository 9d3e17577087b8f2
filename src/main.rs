use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use music_catalog::catalog::Catalog;
use music_catalog::config::load_config;
use music_catalog::engine::{ProbeCoverage, ProbeSettings};
use music_catalog::menu::Menu;
use music_catalog::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "music-catalog")]
#[command(about = "Song catalog with interchangeable search and sort algorithms")]
#[command(version)]
struct Args {
    /// Path to the catalog JSON file (overrides MUSIC_CATALOG_FILE)
    #[arg(short = 'f', long = "data")]
    data_file: Option<PathBuf>,

    /// Fixed seed for the LCG probe search (overrides MUSIC_CATALOG_SEED)
    #[arg(short = 's', long = "seed")]
    seed: Option<u32>,

    /// Keep probing until every song has been visited instead of stopping after n attempts
    #[arg(long = "exhaustive-probe")]
    exhaustive_probe: bool,

    /// Quiet mode - no progress bars
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config()?;

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        config.log_level
    };
    simplelog::SimpleLogger::init(level, simplelog::Config::default())?;

    let data_file = args.data_file.unwrap_or(config.data_file);
    let store = JsonFileStore::new(data_file);
    info!("Using data file {}", store.path().display());

    let mut catalog = Catalog::load(&store)?;
    catalog.set_probe(ProbeSettings {
        seed: args.seed.or(config.probe_seed),
        coverage: if args.exhaustive_probe {
            ProbeCoverage::Exhaustive
        } else {
            ProbeCoverage::Capped
        },
    });

    let stdin = std::io::stdin();
    let mut menu = Menu::new(catalog, &store, stdin.lock(), args.quiet);
    menu.run()
}
