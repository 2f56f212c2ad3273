//! JSON-persisted access ledger
//!
//! Tracks the last access time of every cache entry as a flat JSON array.
//! The ledger is re-read at the start of every mutating operation and
//! written back wholesale at the end; replacement goes through a temp file
//! and a rename so a crash mid-save never leaves a truncated ledger.

use crate::error::{SvnCacheError, SvnCacheResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single persisted ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Absolute path of the cache entry
    pub path: PathBuf,

    /// When the entry was last checked out, updated, exported or hit
    pub last_access_time: DateTime<Utc>,
}

/// Path to last-access mapping backed by a flat JSON file
#[derive(Debug)]
pub struct AccessLedger {
    file: PathBuf,
    records: HashMap<PathBuf, DateTime<Utc>>,
}

impl AccessLedger {
    /// Load the ledger from its backing file.
    ///
    /// A missing file yields an empty ledger. A present but unparsable file
    /// is an error; eviction history must never be silently discarded.
    pub fn load(file: impl Into<PathBuf>) -> SvnCacheResult<Self> {
        let file = file.into();

        if !file.exists() {
            debug!("Ledger {} not found, starting empty", file.display());
            return Ok(Self {
                file,
                records: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&file)
            .map_err(|e| SvnCacheError::io(format!("reading ledger {}", file.display()), e))?;

        let parsed: Vec<AccessRecord> =
            serde_json::from_str(&content).map_err(|e| SvnCacheError::LedgerCorrupt {
                path: file.clone(),
                source: e,
            })?;

        let records = parsed
            .into_iter()
            .map(|r| (r.path, r.last_access_time))
            .collect();

        Ok(Self { file, records })
    }

    /// Persist the full record set, replacing the backing file wholesale.
    pub fn save(&self) -> SvnCacheResult<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SvnCacheError::io(format!("creating ledger directory {}", parent.display()), e)
            })?;
        }

        let records: Vec<AccessRecord> = self
            .records
            .iter()
            .map(|(path, &last_access_time)| AccessRecord {
                path: path.clone(),
                last_access_time,
            })
            .collect();
        let content = serde_json::to_string_pretty(&records)?;

        // Temp-and-rename keeps the old ledger intact if we die mid-write.
        let tmp = self.file.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| SvnCacheError::io(format!("writing ledger {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.file)
            .map_err(|e| SvnCacheError::io(format!("replacing ledger {}", self.file.display()), e))?;

        debug!("Ledger saved with {} record(s)", self.records.len());
        Ok(())
    }

    /// Insert-or-refresh the record for `path` with the current time.
    pub fn touch(&mut self, path: &Path) {
        self.records.insert(path.to_path_buf(), Utc::now());
    }

    /// Drop the record for `path`, if any.
    pub fn remove(&mut self, path: &Path) {
        self.records.remove(path);
    }

    /// Last recorded access for `path`.
    pub fn last_access(&self, path: &Path) -> Option<DateTime<Utc>> {
        self.records.get(path).copied()
    }

    /// Drop every record whose path no longer exists on disk, so the ledger
    /// never outlives the directories it describes.
    pub fn retain_existing(&mut self) {
        self.records.retain(|path, _| path.exists());
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger tracks no entries.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
