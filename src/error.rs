//! Error types for svncache
//!
//! All modules use `SvnCacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for svncache operations
pub type SvnCacheResult<T> = Result<T, SvnCacheError>;

/// All errors that can occur in svncache
#[derive(Error, Debug)]
pub enum SvnCacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Ledger errors
    #[error("Access ledger at {path} is corrupt: {source}")]
    LedgerCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // VCS errors
    #[error("Subversion client not found")]
    SvnNotFound,

    #[error("svn {operation} exited with {status}: {details}")]
    VcsCommand {
        operation: String,
        status: String,
        details: String,
    },

    #[error("Checkout of '{relative_path}' into {destination} failed: {source}")]
    CheckoutFailed {
        relative_path: String,
        destination: PathBuf,
        #[source]
        source: Box<SvnCacheError>,
    },

    #[error("Export of '{relative_path}' at revision {revision} into {destination} failed: {source}")]
    ExportFailed {
        relative_path: String,
        revision: String,
        destination: PathBuf,
        #[source]
        source: Box<SvnCacheError>,
    },

    // Filesystem errors
    #[error("Failed to remove {path}: {source}")]
    RemoveDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Eviction sweep completed with {} deletion failure(s)", .failures.len())]
    SweepIncomplete { failures: Vec<SvnCacheError> },

    #[error("Invalid cache path '{path}': {reason}")]
    PathInvalid { path: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl SvnCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SvnNotFound => {
                Some("Install Subversion and make sure `svn` is on your PATH")
            }
            Self::ConfigInvalid { .. } => {
                Some("Run: svncache init --force to write a fresh config")
            }
            Self::LedgerCorrupt { .. } => {
                Some("Inspect the ledger file; deleting it discards all eviction history")
            }
            _ => None,
        }
    }
}
