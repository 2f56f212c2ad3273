//! Host-wide cache gate
//!
//! A single advisory file lock serializes every mutating cache operation
//! across processes on the host. Acquisition blocks with no timeout; the
//! guard releases on drop, so the gate is never left held on early returns
//! or panics. If a previous holder died while holding the lock the OS has
//! already released it; the stale PID marker left behind in the lock file
//! is reported as a warning and acquisition proceeds.

use crate::error::{SvnCacheError, SvnCacheResult};
use fs4::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// RAII guard for the host-wide mutation lock
#[derive(Debug)]
pub struct CacheGate {
    file: File,
    path: PathBuf,
}

impl CacheGate {
    /// Block until the gate is free, then take it.
    pub fn acquire(path: &Path) -> SvnCacheResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SvnCacheError::io(format!("creating lock directory {}", parent.display()), e)
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                SvnCacheError::io(format!("opening lock file {}", path.display()), e)
            })?;

        let contended = match file.try_lock_exclusive() {
            Ok(()) => false,
            Err(e) if e.kind() == ErrorKind::WouldBlock => true,
            #[cfg(windows)]
            Err(e) if matches!(e.raw_os_error(), Some(32 | 33)) => true,
            Err(e) => {
                return Err(SvnCacheError::io(
                    format!("locking {}", path.display()),
                    e,
                ))
            }
        };
        if contended {
            debug!("Gate {} is held, waiting", path.display());
            file.lock_exclusive().map_err(|e| {
                SvnCacheError::io(format!("locking {}", path.display()), e)
            })?;
        }

        // A leftover marker means the previous holder never released cleanly.
        let mut marker = String::new();
        let _ = file
            .seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_string(&mut marker));
        let marker = marker.trim();
        if !marker.is_empty() {
            warn!(
                "Gate {} was abandoned by process {}, proceeding",
                path.display(),
                marker
            );
        }

        // The marker is diagnostic only; the lock is what serializes.
        let _ = file.set_len(0);
        let _ = file.seek(SeekFrom::Start(0));
        let _ = write!(file, "{}", std::process::id());
        let _ = file.flush();

        debug!("Gate {} acquired", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for CacheGate {
    fn drop(&mut self) {
        // Clear the marker before the lock goes with the handle.
        let _ = self.file.set_len(0);
        let _ = self.file.unlock();
        debug!("Gate {} released", self.path.display());
    }
}
