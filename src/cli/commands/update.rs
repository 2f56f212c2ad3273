//! Update command - check out or refresh a working copy

use crate::cache::{CacheManager, UpdateOutcome};
use crate::cli::args::UpdateArgs;
use crate::config::Config;
use crate::error::SvnCacheResult;
use crate::vcs::SvnClient;
use console::style;

/// Execute the update command
pub fn execute(args: UpdateArgs, config: &Config) -> SvnCacheResult<()> {
    let vcs = SvnClient::from_config(&config.repository);
    let manager = CacheManager::new(config, Box::new(vcs));

    match manager.update(&args.path)? {
        UpdateOutcome::Ready(destination) => {
            println!("{} {}", style("✓").green(), destination.display());
        }
        UpdateOutcome::Discarded(destination) => {
            println!(
                "{} {} was inconsistent and has been discarded; run update again for a fresh checkout",
                style("!").yellow(),
                destination.display()
            );
        }
    }

    Ok(())
}
