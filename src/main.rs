//! artist-search - find tracks in a local library by artist name

use anyhow::{Context, Result};
use artist_search::catalog::local::LocalCatalog;
use artist_search::config::Config;
use artist_search::{normalize_artist_name, ArtistSearchContext};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Library database (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search tracks by artist
    Search {
        artist: String,

        /// Maximum number of tracks (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rebuild the library database from a music directory
    Index {
        /// Directory to scan (defaults to config)
        dir: Option<PathBuf>,
    },
    /// Print the normalized form of an artist name
    Normalize { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.level()
    };
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        Err(_) => {
            let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.library_db_path));

    match args.command {
        Command::Normalize { name } => {
            println!("{}", normalize_artist_name(&name));
        }
        Command::Index { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.library_path));
            let catalog = LocalCatalog::open(&db_path)
                .with_context(|| format!("opening library at {}", db_path.display()))?;
            let count = catalog.index_directory(&dir)?;
            println!("Indexed {} tracks from {}", count, dir.display());
        }
        Command::Search {
            artist,
            limit,
            json,
        } => {
            let catalog = Arc::new(
                LocalCatalog::open(&db_path)
                    .with_context(|| format!("opening library at {}", db_path.display()))?,
            );
            let context = ArtistSearchContext::new(catalog.clone());
            let limit = limit.unwrap_or(config.default_limit);

            info!("🔎 Searching for artist '{}' (limit {})", artist, limit);
            let result = context
                .search_tracks_by_artist(catalog.as_ref(), &artist, limit)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if !result.is_success() {
                println!("No artists found matching '{}'", artist);
            } else {
                println!(
                    "Matched {} ({} tracks)",
                    result.matched_artists().join(", "),
                    result.tracks().len()
                );
                for track in result.tracks() {
                    println!(
                        "  {} - {} [{}]",
                        track.artist.as_deref().unwrap_or("Unknown Artist"),
                        track.title,
                        track.album.as_deref().unwrap_or("Unknown Album")
                    );
                }
            }
        }
    }

    Ok(())
}
