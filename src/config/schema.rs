//! Configuration schema
//!
//! Configuration is stored at `~/.config/svncache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote repository settings
    pub repository: RepositoryConfig,

    /// Cache layout and eviction settings
    pub cache: CacheConfig,
}

/// Remote repository connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository URL the cache mirrors
    pub url: String,

    /// Username, if the repository requires authentication
    pub username: Option<String>,

    /// Password for the repository
    pub password: Option<String>,
}

/// Cache layout and eviction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory that holds every cache entry
    pub export_root: PathBuf,

    /// Access ledger location (defaults to `<export_root>/access-ledger.json`)
    pub ledger_file: Option<PathBuf>,

    /// Days a mainline working copy may sit idle before eviction
    pub mainline_ttl_days: u32,

    /// Days a tags/branches entry may sit idle before eviction
    pub tags_branches_ttl_days: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            export_root: default_export_root(),
            ledger_file: None,
            mainline_ttl_days: 30,
            tags_branches_ttl_days: 7,
        }
    }
}

impl CacheConfig {
    /// Effective ledger path.
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_file
            .clone()
            .unwrap_or_else(|| self.export_root.join("access-ledger.json"))
    }

    /// Lock file guarding every cache mutation. Derived from the ledger
    /// location so every process sharing a ledger shares the gate.
    pub fn gate_path(&self) -> PathBuf {
        let ledger = self.ledger_path();
        let mut name = ledger
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        ledger.with_file_name(name)
    }
}

fn default_export_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("svncache")
}
