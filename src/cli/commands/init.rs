//! Init command - write a starter config file

use crate::cli::args::InitArgs;
use crate::config::ConfigManager;
use crate::error::{SvnCacheError, SvnCacheResult};
use console::style;
use std::fs;

/// Template for a fresh configuration file
const INIT_TEMPLATE: &str = r#"# svncache configuration

[repository]
url = "https://svn.example.com/repo"
# username = "builder"
# password = "secret"

[cache]
# Where working copies and pinned exports live
# export_root = "/var/cache/svncache"
# ledger_file = "/var/cache/svncache/access-ledger.json"

# Days a mainline working copy may sit idle before eviction
mainline_ttl_days = 30

# Days a tags/branches entry may sit idle before eviction
tags_branches_ttl_days = 7
"#;

/// Execute the init command
pub fn execute(args: InitArgs, manager: &ConfigManager) -> SvnCacheResult<()> {
    let path = manager.path();

    if path.exists() && !args.force {
        return Err(SvnCacheError::User(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SvnCacheError::ConfigDirCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, INIT_TEMPLATE)
        .map_err(|e| SvnCacheError::io(format!("writing config to {}", path.display()), e))?;

    println!("{} wrote {}", style("✓").green(), path.display());
    Ok(())
}
