//! Forced directory removal
//!
//! Subversion working copies carry read-only files under their `.svn`
//! metadata, and plain `remove_dir_all` refuses those on some platforms.
//! Eviction therefore clears the read-only attribute on every node before
//! removing the tree.

use crate::error::{SvnCacheError, SvnCacheResult};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Remove `path` and everything beneath it, read-only nodes included.
///
/// A missing directory is a no-op. Any other failure is reported to the
/// caller; call sites decide whether to propagate immediately or collect
/// into a batch.
pub fn remove_dir_forced(path: &Path) -> SvnCacheResult<()> {
    if !path.exists() {
        return Ok(());
    }

    debug!("Removing {}", path.display());
    clear_readonly(path).map_err(|e| SvnCacheError::RemoveDir {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::remove_dir_all(path).map_err(|e| SvnCacheError::RemoveDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Restore owner write permission on `path` and, for directories, on
/// everything beneath it. The directory itself comes first: a read-only
/// directory blocks deletion of its children.
fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = metadata.permissions();
        let mode = permissions.mode();
        if mode & 0o200 == 0 {
            permissions.set_mode(mode | 0o200);
            fs::set_permissions(path, permissions)?;
        }
    }
    #[cfg(not(unix))]
    {
        let mut permissions = metadata.permissions();
        if permissions.readonly() {
            permissions.set_readonly(false);
            fs::set_permissions(path, permissions)?;
        }
    }

    if metadata.is_dir() {
        for entry in fs::read_dir(path)? {
            clear_readonly(&entry?.path())?;
        }
    }

    Ok(())
}
