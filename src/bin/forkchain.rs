#![forbid(unsafe_code)]
//! Interactive forkchain shell

use clap::Parser;
use colored::*;
use forkchain::blockchain::Ledger;
use forkchain::cli::Session;
use forkchain::config::{load_config, load_config_from};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./forkchain.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name of the genesis branch, overriding the config file
    #[arg(long)]
    branch: Option<String>,
    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(branch) = cli.branch {
        config.ledger.genesis_branch = branch;
    }
    if cli.no_color {
        config.display.color = false;
        colored::control::set_override(false);
    }

    let ledger = Ledger::with_genesis_branch(&config.ledger.genesis_branch);
    info!(branch = %ledger.current_branch(), "ledger initialised");

    if config.display.color {
        println!("{}", "forkchain".bright_cyan().bold());
    } else {
        println!("forkchain");
    }

    let stdin = io::stdin();
    let mut session = Session::new(ledger, config, stdin.lock(), io::stdout());
    session.run()?;

    Ok(())
}
