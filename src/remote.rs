//! Optional post-sync command execution on the remote host.
//!
//! When `syncwip.postsync` is configured, the command runs on the remote in
//! the synced directory via ssh. The command string is the user's own shell
//! fragment and is passed through untouched; only the directory component we
//! interpolate is quote-escaped.

use std::path::Path;

use crate::context::SyncContext;
use crate::error::{SyncwipError, SyncwipResult};
use crate::process::{CommandRunner, Invocation};

/// Post-sync runner bound to a command runner.
pub struct PostSync<'r> {
    runner: &'r dyn CommandRunner,
}

impl<'r> PostSync<'r> {
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Build the ssh invocation for a host, directory, and command.
    ///
    /// `cd` and the command are joined with `&&` so a missing remote
    /// directory stops the command from running somewhere else entirely.
    pub fn invocation(host: &str, local_dir: &Path, command: &str) -> Invocation {
        let script = format!(
            "cd {} && {}",
            quote(&local_dir.display().to_string()),
            command
        );
        Invocation::new("ssh").arg(host).arg(script)
    }

    /// Run the configured command, if any.
    ///
    /// Returns whether a command ran. A missing or blank command is a no-op,
    /// not an error. A non-zero remote exit is surfaced but arrives after
    /// the sync itself already succeeded.
    pub fn run(&self, context: &SyncContext, command: Option<&str>) -> SyncwipResult<bool> {
        let Some(command) = command.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(false);
        };

        let invocation = Self::invocation(&context.remote_host, &context.local_dir, command);
        let exit = self.runner.stream(&invocation, &context.repo_root)?;

        if !exit.success {
            return Err(SyncwipError::RemoteExec {
                host: context.remote_host.clone(),
                code: exit.code,
            });
        }
        Ok(true)
    }
}

/// Single-quote a value for the remote shell.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
