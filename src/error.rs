//! Error types for syncwip
//!
//! Uses `thiserror` for all pipeline errors. The binary maps these to
//! process exit codes in `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for syncwip operations
pub type SyncwipResult<T> = Result<T, SyncwipError>;

/// Main error type for syncwip operations
#[derive(Error, Debug)]
pub enum SyncwipError {
    /// The working directory is not inside a git repository
    #[error("could not resolve repository root: {message}")]
    RepoNotFound { message: String },

    /// No host argument and no `syncwip.remote` configuration
    #[error("no remote host: pass one as an argument or set `git config syncwip.remote`")]
    RemoteUnresolved,

    /// Repository root is not strictly below the home directory
    #[error("repository root '{root}' is not below home directory '{home}'")]
    RootOutsideHome { root: PathBuf, home: PathBuf },

    /// The home directory does not follow the per-user layout this tool assumes
    #[error("home directory '{home}' is not the per-user directory of '{user}' (use --no-home-check to skip this check)")]
    HomeLayoutMismatch { home: PathBuf, user: String },

    /// A required environment variable is unset
    #[error("cannot determine {variable} from the environment")]
    EnvMissing { variable: &'static str },

    /// The mirror transfer exited non-zero
    #[error("rsync failed with exit code {code:?}")]
    Sync { code: Option<i32> },

    /// The post-sync command exited non-zero on the remote
    #[error("post-sync command failed on '{host}' with exit code {code:?}")]
    RemoteExec { host: String, code: Option<i32> },

    /// IO error spawning an external tool
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncwipError {
    /// Process exit code for this error.
    ///
    /// Child-process failures propagate the child's own exit code, so the
    /// tool exits with the code of the last subprocess it ran. Resolution
    /// and invariant failures exit 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncwipError::Sync { code } | SyncwipError::RemoteExec { code, .. } => {
                code.unwrap_or(1)
            }
            _ => 1,
        }
    }
}
