//! Disk-resident cache of working copies and pinned exports
//!
//! Layout under the export root:
//!
//! | Entry | Path | TTL |
//! |-------|------|-----|
//! | Working copy | `<root>/<relative>` | mainline |
//! | Pinned export | `<root>/<relative>_<revision>` | by subtree |
//! | Tags / branches | `<root>/tags/*`, `<root>/branches/*` | secondary |
//!
//! Every mutating operation is serialized by a host-wide gate and recorded
//! in a JSON access ledger; the eviction sweep reconciles the ledger
//! against the filesystem and removes idle or orphaned entries.

pub mod gate;
pub mod ledger;
pub mod manager;
pub mod reaper;

pub use gate::CacheGate;
pub use ledger::{AccessLedger, AccessRecord};
pub use manager::{CacheManager, SweepSummary, UpdateOutcome};
pub use reaper::remove_dir_forced;
