//! Git queries: repository root and `syncwip.*` configuration.
//!
//! Git is the only configuration source this tool has. The repository root
//! anchors the transfer, and the `syncwip.remote` / `syncwip.postsync`
//! config keys supply the destination host and the optional remote command.

use std::path::{Path, PathBuf};

use crate::error::{SyncwipError, SyncwipResult};
use crate::process::{CommandRunner, Invocation};

/// Config key naming the default remote host or ssh alias.
pub const REMOTE_KEY: &str = "syncwip.remote";

/// Config key naming the optional post-sync command.
pub const POST_SYNC_KEY: &str = "syncwip.postsync";

/// Git query interface bound to a working directory.
pub struct Git<'r> {
    runner: &'r dyn CommandRunner,
    cwd: PathBuf,
}

impl<'r> Git<'r> {
    pub fn new(runner: &'r dyn CommandRunner, cwd: &Path) -> Self {
        Self {
            runner,
            cwd: cwd.to_path_buf(),
        }
    }

    /// Resolve the repository top-level directory for the working directory.
    ///
    /// Fatal when the working directory is not inside a repository; there is
    /// no fallback root.
    pub fn repo_root(&self) -> SyncwipResult<PathBuf> {
        let invocation = Invocation::new("git").arg("rev-parse").arg("--show-toplevel");
        let output = self.runner.capture(&invocation, &self.cwd)?;

        if !output.stderr.is_empty() {
            eprint!("{}", output.stderr);
        }

        if !output.success {
            return Err(SyncwipError::RepoNotFound {
                message: format!("git rev-parse exited with {:?}", output.code),
            });
        }

        let root = output.stdout.trim();
        if root.is_empty() {
            return Err(SyncwipError::RepoNotFound {
                message: "git rev-parse printed no path".to_string(),
            });
        }

        Ok(PathBuf::from(root))
    }

    /// Read a single config value.
    ///
    /// An unset key (git exits 1) is `None`, not an error: configuration
    /// absence means the feature is disabled. Values are trimmed, since git
    /// terminates them with a newline.
    pub fn config(&self, key: &str) -> SyncwipResult<Option<String>> {
        let invocation = Invocation::new("git").arg("config").arg("--get").arg(key);
        let output = self.runner.capture(&invocation, &self.cwd)?;

        if !output.success {
            return Ok(None);
        }

        let value = output.stdout.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }
}
