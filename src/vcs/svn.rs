//! Subversion command-line client
//!
//! Drives the `svn` binary non-interactively. Server certificate trust is
//! delegated to svn's own configuration plus `--trust-server-cert-failures`.

use crate::config::RepositoryConfig;
use crate::error::{SvnCacheError, SvnCacheResult};
use crate::vcs::VcsClient;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Max number of output lines to include in error messages.
const ERROR_TAIL_LINES: usize = 20;

/// `svn` command-line client for one configured repository
#[derive(Debug, Clone)]
pub struct SvnClient {
    url: String,
    username: Option<String>,
    password: Option<String>,
}

impl SvnClient {
    /// Build a client from the repository section of the configuration.
    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self {
            url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Remote URL for a repository-relative path.
    fn remote_target(&self, relative_path: &str) -> String {
        format!("{}/{}", self.url, relative_path.trim_start_matches('/'))
    }

    fn run(&self, operation: &str, args: &[&str]) -> SvnCacheResult<()> {
        let mut command = Command::new("svn");
        command.arg(operation).args([
            "--non-interactive",
            "--trust-server-cert-failures=unknown-ca",
            "--no-auth-cache",
        ]);
        if let Some(ref username) = self.username {
            command.args(["--username", username]);
        }
        if let Some(ref password) = self.password {
            command.args(["--password", password]);
        }
        command.args(args);

        debug!("Running svn {}", operation);
        let output = command.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => SvnCacheError::SvnNotFound,
            _ => SvnCacheError::command_failed(format!("svn {operation}"), e),
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(SvnCacheError::VcsCommand {
            operation: operation.to_string(),
            status: output.status.to_string(),
            details: output_tail(&stdout, &stderr),
        })
    }
}

/// Extract the useful tail of svn output for error diagnostics.
///
/// Combines stdout and stderr, then returns the last `ERROR_TAIL_LINES`
/// lines so error messages stay actionable without being overwhelming.
fn output_tail(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let skip = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[skip..].join("\n")
}

impl VcsClient for SvnClient {
    fn checkout(&self, relative_path: &str, destination: &Path) -> SvnCacheResult<()> {
        let remote = self.remote_target(relative_path);
        let dest = destination.to_string_lossy();
        self.run("checkout", &[remote.as_str(), dest.as_ref()])
    }

    fn update(&self, destination: &Path) -> SvnCacheResult<()> {
        let dest = destination.to_string_lossy();
        self.run("update", &[dest.as_ref()])
    }

    fn export(
        &self,
        relative_path: &str,
        revision: &str,
        destination: &Path,
    ) -> SvnCacheResult<()> {
        let remote = self.remote_target(relative_path);
        let dest = destination.to_string_lossy();
        self.run("export", &["--force", "-r", revision, remote.as_str(), dest.as_ref()])
    }
}
