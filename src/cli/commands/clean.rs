//! Clean command - run the eviction sweep

use crate::cache::CacheManager;
use crate::cli::args::CleanArgs;
use crate::config::Config;
use crate::error::SvnCacheResult;
use crate::vcs::SvnClient;
use console::style;

/// Execute the clean command
pub fn execute(args: CleanArgs, config: &Config) -> SvnCacheResult<()> {
    let vcs = SvnClient::from_config(&config.repository);
    let manager = CacheManager::new(config, Box::new(vcs));

    let summary = manager.clean(args.dry_run)?;

    if summary.evicted.is_empty() {
        println!("Nothing to evict, {} entry(s) retained.", summary.retained);
        return Ok(());
    }

    for path in &summary.evicted {
        println!("  {} {}", style("•").red(), path.display());
    }
    println!();
    if args.dry_run {
        println!("Dry run - would evict {} entry(s).", summary.evicted.len());
    } else {
        println!(
            "{} evicted {} entry(s), {} retained",
            style("✓").green(),
            summary.evicted.len(),
            summary.retained
        );
    }

    Ok(())
}
