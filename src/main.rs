//! sqlite-setup: create or refresh the application database in place.

use anyhow::{Context, Result};
use clap::Parser;
use sqlite_setup::{bootstrap, report, Config};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Create or refresh the SQLite database schema")]
struct Cli {
    /// Database file, relative to the output directory unless absolute
    #[arg(long, env = "SQLITE_SETUP_DATABASE")]
    database: Option<PathBuf>,

    /// Directory for the database and connection files
    #[arg(long, env = "SQLITE_SETUP_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// TOML file with defaults for the options above and `[metadata]`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not print the summary
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting SQLite setup v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    }
    .with_overrides(cli.database, cli.output_dir);

    let outcome = match bootstrap::run(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("SQLite setup failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        println!("{}", report::render_summary(&outcome));
    }
    Ok(())
}
