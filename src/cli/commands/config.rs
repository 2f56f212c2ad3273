//! Config command - show or locate the configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::SvnCacheResult;

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> SvnCacheResult<()> {
    match args.action {
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(config)?;
            print!("{rendered}");
        }
        ConfigAction::Path => {
            println!("{}", manager.path().display());
        }
    }

    Ok(())
}
