use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use snaky::game::{Game, GameConfig, MIN_HEIGHT, MIN_WIDTH, Speed};
use snaky::render::TerminalRenderer;

#[derive(Parser)]
#[command(name = "snaky")]
#[command(version, about = "Snake game in the terminal")]
#[command(after_help = "Usage example:\n  ./snaky -x 30 -y 15 -s fast")]
struct Cli {
    /// Grid width (at least 26)
    #[arg(short = 'x', default_value_t = MIN_WIDTH)]
    width: usize,

    /// Grid height (at least 14)
    #[arg(short = 'y', default_value_t = MIN_HEIGHT)]
    height: usize,

    /// Game speed: slow, medium or fast
    #[arg(short = 's', default_value = "medium")]
    speed: String,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.width, cli.height, Speed::from_name(&cli.speed));
    info!(?config, "starting");

    let renderer = TerminalRenderer::new()?;
    let game = match cli.seed {
        Some(seed) => Game::with_seed(config, seed, renderer)?,
        None => Game::new(config, renderer)?,
    };

    let result = game.run().await;
    match &result {
        Ok(()) => info!("game over"),
        Err(err) => error!(%err, "game failed"),
    }

    result
}
