//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// svncache - TTL-evicting cache of Subversion checkouts
///
/// Keeps working copies and pinned exports of a remote repository under a
/// single cache root and evicts entries that sit idle past their TTL.
#[derive(Parser, Debug)]
#[command(name = "svncache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SVNCACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check out or refresh a working copy
    Update(UpdateArgs),

    /// Materialize a pinned export of a specific revision
    Export(ExportArgs),

    /// Evict idle and orphaned cache entries
    Clean(CleanArgs),

    /// Write a starter configuration file
    Init(InitArgs),

    /// Show or locate the configuration
    Config(ConfigArgs),
}

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Repository-relative path (e.g. "trunk" or "branches/feature-x")
    pub path: String,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Repository-relative path
    pub path: String,

    /// Revision to pin the export to
    pub revision: String,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Report what would be evicted without deleting anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action to perform
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config inspection actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,
}
