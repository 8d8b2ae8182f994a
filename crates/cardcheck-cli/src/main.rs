mod commands;
mod replay;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardcheck", about = "Card capture quality checker")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score still images for blur and glare
    Score(commands::score::ScoreArgs),
    /// Solve the crop ratio and offsets for a source and container
    Geometry(commands::geometry::GeometryArgs),
    /// Replay a directory of frames as a live camera
    Watch(commands::watch::WatchArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Score(args) => commands::score::run(args, config_path),
        Commands::Geometry(args) => commands::geometry::run(args, config_path),
        Commands::Watch(args) => commands::watch::run(args, config_path),
        Commands::Config(args) => commands::config::run(args),
    }
}
