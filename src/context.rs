//! Per-run context and the home-directory layout it is derived from.
//!
//! The tool assumes host layouts mirror relative-to-home paths: a repository
//! at `$HOME/proj` locally lives at `~/proj` on the remote. `HomeLayout`
//! validates that assumption and derives the relative path; `SyncContext`
//! carries the resolved values through the pipeline stages unchanged.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{SyncwipError, SyncwipResult};

/// Immutable values resolved once at startup and threaded through each
/// pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncContext {
    /// Absolute path to the local repository top-level directory
    pub repo_root: PathBuf,
    /// Destination host or ssh alias
    pub remote_host: String,
    /// Repository path relative to home, reused verbatim on the remote
    pub local_dir: PathBuf,
}

/// Expected home-directory layout for the current user.
#[derive(Debug, Clone)]
pub struct HomeLayout {
    pub home: PathBuf,
    pub user: Option<String>,
    /// Whether the final home path component must equal the login user
    /// (`/Users/alice`, `/home/alice`). Disabled by `--no-home-check`.
    pub require_user_suffix: bool,
}

impl HomeLayout {
    /// Build from the environment: `$HOME` first, `dirs::home_dir()` as a
    /// fallback for platforms where the variable is unset.
    pub fn from_env() -> SyncwipResult<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(SyncwipError::EnvMissing { variable: "HOME" })?;
        let user = std::env::var("USER").ok();

        Ok(Self {
            home,
            user,
            require_user_suffix: true,
        })
    }

    /// Validate the per-user home convention.
    ///
    /// Fails fast, before any remote-facing subprocess runs, when the
    /// environment does not look like the per-user layout the relative-path
    /// mapping depends on.
    pub fn validate(&self) -> SyncwipResult<()> {
        if !self.require_user_suffix {
            return Ok(());
        }

        let user = self
            .user
            .as_deref()
            .ok_or(SyncwipError::EnvMissing { variable: "USER" })?;

        let matches = self
            .home
            .file_name()
            .map(|name| name == OsStr::new(user))
            .unwrap_or(false);

        if !matches {
            return Err(SyncwipError::HomeLayoutMismatch {
                home: self.home.clone(),
                user: user.to_string(),
            });
        }
        Ok(())
    }

    /// Strip the home prefix from the repository root.
    ///
    /// The result is the path component used on the remote host. A root
    /// outside (or equal to) home has no meaningful relative form and is
    /// rejected rather than silently mis-mapped.
    pub fn local_dir(&self, repo_root: &Path) -> SyncwipResult<PathBuf> {
        let relative = repo_root.strip_prefix(&self.home).map_err(|_| {
            SyncwipError::RootOutsideHome {
                root: repo_root.to_path_buf(),
                home: self.home.clone(),
            }
        })?;

        if relative.as_os_str().is_empty() {
            return Err(SyncwipError::RootOutsideHome {
                root: repo_root.to_path_buf(),
                home: self.home.clone(),
            });
        }

        Ok(relative.to_path_buf())
    }
}
