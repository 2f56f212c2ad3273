//! Cache lifecycle orchestration
//!
//! Every mutating operation follows the same envelope: take the host-wide
//! gate, re-read the ledger, do the filesystem/VCS work, persist whatever
//! state the ledger reached, release the gate. The gate is deliberately
//! coarse: at most one mutation of any kind proceeds anywhere in the cache
//! at a time, across every process on the host.

use crate::cache::gate::CacheGate;
use crate::cache::ledger::AccessLedger;
use crate::cache::reaper::remove_dir_forced;
use crate::config::Config;
use crate::error::{SvnCacheError, SvnCacheResult};
use crate::vcs::VcsClient;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

const TAGS_DIR: &str = "tags";
const BRANCHES_DIR: &str = "branches";

/// Result of a successful `update` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Working copy checked out or refreshed at the given path
    Ready(PathBuf),

    /// The working copy was inconsistent and has been discarded; the next
    /// update on the same path performs a clean checkout
    Discarded(PathBuf),
}

/// Outcome of an eviction sweep
#[derive(Debug, Default)]
pub struct SweepSummary {
    /// Directories removed (or, in dry-run mode, due for removal)
    pub evicted: Vec<PathBuf>,

    /// Directories inspected and kept
    pub retained: usize,
}

struct SweepState {
    now: DateTime<Utc>,
    dry_run: bool,
    summary: SweepSummary,
    failures: Vec<SvnCacheError>,
}

/// Orchestrates Update, ExportToRevision and Clean over one cache root
pub struct CacheManager {
    export_root: PathBuf,
    ledger_file: PathBuf,
    gate_file: PathBuf,
    mainline_ttl: Duration,
    tags_branches_ttl: Duration,
    vcs: Box<dyn VcsClient>,
}

impl CacheManager {
    /// Build a manager from configuration and a VCS client.
    pub fn new(config: &Config, vcs: Box<dyn VcsClient>) -> Self {
        Self {
            export_root: config.cache.export_root.clone(),
            ledger_file: config.cache.ledger_path(),
            gate_file: config.cache.gate_path(),
            mainline_ttl: Duration::days(i64::from(config.cache.mainline_ttl_days)),
            tags_branches_ttl: Duration::days(i64::from(config.cache.tags_branches_ttl_days)),
            vcs,
        }
    }

    /// Destination directory for a working copy of `relative_path`.
    pub fn destination(&self, relative_path: &str) -> PathBuf {
        self.export_root.join(relative_path)
    }

    /// Destination directory for a pinned export. The revision is embedded
    /// in the final component, so each exported revision is its own
    /// immutable entry.
    pub fn export_destination(&self, relative_path: &str, revision: &str) -> PathBuf {
        self.export_root.join(format!("{relative_path}_{revision}"))
    }

    /// Check out `relative_path` if absent, otherwise bring the existing
    /// working copy up to date.
    ///
    /// A VCS failure that leaves a directory behind marks the working copy
    /// as inconsistent: the directory and its ledger record are removed and
    /// the VCS failure is swallowed, so the next call starts from a clean
    /// checkout. A VCS failure that leaves nothing behind is propagated.
    pub fn update(&self, relative_path: &str) -> SvnCacheResult<UpdateOutcome> {
        Self::validate_relative(relative_path)?;
        let destination = self.destination(relative_path);

        let _gate = CacheGate::acquire(&self.gate_file)?;
        let mut ledger = AccessLedger::load(&self.ledger_file)?;

        let outcome = self.refresh_working_copy(&mut ledger, relative_path, &destination);
        let saved = ledger.save();

        let outcome = outcome?;
        saved?;
        Ok(outcome)
    }

    fn refresh_working_copy(
        &self,
        ledger: &mut AccessLedger,
        relative_path: &str,
        destination: &Path,
    ) -> SvnCacheResult<UpdateOutcome> {
        let result = if destination.exists() {
            debug!("Updating working copy {}", destination.display());
            self.vcs.update(destination)
        } else {
            info!(
                "Checking out '{}' into {}",
                relative_path,
                destination.display()
            );
            ensure_parent(destination)?;
            self.vcs.checkout(relative_path, destination)
        };

        match result {
            Ok(()) => {
                ledger.touch(destination);
                Ok(UpdateOutcome::Ready(destination.to_path_buf()))
            }
            Err(source) if destination.exists() => {
                // Inconsistent working copy: discard it and let the next
                // call re-checkout from scratch.
                warn!(
                    "VCS operation on {} failed ({}), discarding the working copy",
                    destination.display(),
                    source
                );
                remove_dir_forced(destination)?;
                ledger.remove(destination);
                Ok(UpdateOutcome::Discarded(destination.to_path_buf()))
            }
            Err(source) => Err(SvnCacheError::CheckoutFailed {
                relative_path: relative_path.to_string(),
                destination: destination.to_path_buf(),
                source: Box::new(source),
            }),
        }
    }

    /// Materialize a pinned export of `relative_path` at `revision`, or
    /// refresh its access time if it is already on disk.
    ///
    /// A revisioned export is content-stable once materialized, so an
    /// existing destination is never re-fetched. Export failures are always
    /// propagated: a half-written snapshot is unsafe to silently discard
    /// and retry.
    pub fn export_to_revision(
        &self,
        relative_path: &str,
        revision: &str,
    ) -> SvnCacheResult<PathBuf> {
        Self::validate_relative(relative_path)?;
        let destination = self.export_destination(relative_path, revision);

        let _gate = CacheGate::acquire(&self.gate_file)?;
        let mut ledger = AccessLedger::load(&self.ledger_file)?;

        let outcome = if destination.exists() {
            debug!("Export {} already materialized", destination.display());
            ledger.touch(&destination);
            Ok(())
        } else {
            info!(
                "Exporting '{}' at revision {} into {}",
                relative_path,
                revision,
                destination.display()
            );
            ensure_parent(&destination)?;
            match self.vcs.export(relative_path, revision, &destination) {
                Ok(()) => {
                    ledger.touch(&destination);
                    Ok(())
                }
                Err(source) => Err(SvnCacheError::ExportFailed {
                    relative_path: relative_path.to_string(),
                    revision: revision.to_string(),
                    destination: destination.clone(),
                    source: Box::new(source),
                }),
            }
        };
        let saved = ledger.save();

        outcome?;
        saved?;
        Ok(destination)
    }

    /// Evict idle and orphaned entries from the cache.
    ///
    /// Sweeps the export root under the mainline TTL and the `tags` and
    /// `branches` subtrees under the secondary TTL. Tracked entries past
    /// their TTL and any untracked directory are removed. Deletion failures
    /// are collected so a partial sweep still commits its progress; the
    /// ledger is persisted before they are surfaced together.
    pub fn clean(&self, dry_run: bool) -> SvnCacheResult<SweepSummary> {
        let _gate = CacheGate::acquire(&self.gate_file)?;
        let mut ledger = AccessLedger::load(&self.ledger_file)?;

        let mut state = SweepState {
            now: Utc::now(),
            dry_run,
            summary: SweepSummary::default(),
            failures: Vec::new(),
        };

        let roots = [
            (self.export_root.clone(), self.mainline_ttl, true),
            (self.export_root.join(TAGS_DIR), self.tags_branches_ttl, false),
            (
                self.export_root.join(BRANCHES_DIR),
                self.tags_branches_ttl,
                false,
            ),
        ];
        for (root, ttl, skip_containers) in roots {
            self.sweep_root(&mut ledger, &root, ttl, skip_containers, &mut state);
            if !dry_run {
                ledger.retain_existing();
            }
        }

        let saved = if dry_run { Ok(()) } else { ledger.save() };

        if !state.failures.is_empty() {
            if let Err(e) = saved {
                warn!("Ledger save also failed during the sweep: {}", e);
            }
            return Err(SvnCacheError::SweepIncomplete {
                failures: state.failures,
            });
        }
        saved?;

        debug!(
            "Sweep evicted {}, retained {}",
            state.summary.evicted.len(),
            state.summary.retained
        );
        Ok(state.summary)
    }

    fn sweep_root(
        &self,
        ledger: &mut AccessLedger,
        root: &Path,
        ttl: Duration,
        skip_containers: bool,
        state: &mut SweepState,
    ) {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                state
                    .failures
                    .push(SvnCacheError::io(format!("listing {}", root.display()), e));
                return;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    state
                        .failures
                        .push(SvnCacheError::io(format!("listing {}", root.display()), e));
                    continue;
                }
            };
            if !path.is_dir() {
                continue; // the ledger and lock files live beside the entries
            }
            if skip_containers && is_container(&path) {
                continue;
            }

            let expired = match ledger.last_access(&path) {
                Some(last_access) => state.now - last_access > ttl,
                // Untracked directories are orphans, evicted regardless of age.
                None => true,
            };
            if !expired {
                state.summary.retained += 1;
                continue;
            }

            if state.dry_run {
                state.summary.evicted.push(path);
                continue;
            }
            match remove_dir_forced(&path) {
                Ok(()) => {
                    info!("Evicted {}", path.display());
                    ledger.remove(&path);
                    state.summary.evicted.push(path);
                }
                Err(e) => {
                    warn!("Could not evict {}: {}", path.display(), e);
                    state.failures.push(e);
                }
            }
        }
    }

    fn validate_relative(relative_path: &str) -> SvnCacheResult<()> {
        if relative_path.is_empty() {
            return Err(SvnCacheError::PathInvalid {
                path: relative_path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        let path = Path::new(relative_path);
        if path.is_absolute() {
            return Err(SvnCacheError::PathInvalid {
                path: relative_path.to_string(),
                reason: "must be repository-relative".to_string(),
            });
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(SvnCacheError::PathInvalid {
                path: relative_path.to_string(),
                reason: "parent directory components are not allowed".to_string(),
            });
        }
        Ok(())
    }
}

/// The VCS client creates the destination itself but not its parents.
fn ensure_parent(destination: &Path) -> SvnCacheResult<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SvnCacheError::io(format!("creating parent directory {}", parent.display()), e)
        })?;
    }
    Ok(())
}

fn is_container(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == TAGS_DIR || name == BRANCHES_DIR)
}
