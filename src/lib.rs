//! svncache - TTL-evicting local cache of Subversion checkouts
//!
//! Maintains working copies and pinned exports of a remote repository
//! under a single cache root, tracks per-entry last-access time in a JSON
//! ledger, and evicts entries that sit idle past their configured TTL.
//! All cache mutations are serialized host-wide by an advisory file lock.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod vcs;

pub use error::{SvnCacheError, SvnCacheResult};
