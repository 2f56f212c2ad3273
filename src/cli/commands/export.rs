//! Export command - materialize a pinned snapshot

use crate::cache::CacheManager;
use crate::cli::args::ExportArgs;
use crate::config::Config;
use crate::error::SvnCacheResult;
use crate::vcs::SvnClient;
use console::style;

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> SvnCacheResult<()> {
    let vcs = SvnClient::from_config(&config.repository);
    let manager = CacheManager::new(config, Box::new(vcs));

    let destination = manager.export_to_revision(&args.path, &args.revision)?;
    println!("{} {}", style("✓").green(), destination.display());

    Ok(())
}
