//! svncache - TTL-evicting cache of Subversion checkouts
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use svncache::cli::{Cli, Commands};
use svncache::config::ConfigManager;
use svncache::error::SvnCacheResult;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> SvnCacheResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("svncache=warn"),
        1 => EnvFilter::new("svncache=info"),
        _ => EnvFilter::new("svncache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Init only needs the target path, not a loaded config
    if let Commands::Init(args) = cli.command {
        return svncache::cli::commands::init(args, &config_manager);
    }

    let config = config_manager.load()?;

    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Update(args) => svncache::cli::commands::update(args, &config),
        Commands::Export(args) => svncache::cli::commands::export(args, &config),
        Commands::Clean(args) => svncache::cli::commands::clean(args, &config),
        Commands::Config(args) => svncache::cli::commands::config(args, &config, &config_manager),
    }
}
