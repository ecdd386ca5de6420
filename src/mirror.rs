//! One-way mirror of the repository tree onto the remote host.
//!
//! Wraps rsync with a fixed flag set:
//!
//! - `-r`  recursive
//! - `-t`  preserve modification times
//! - `-l`  copy symlinks as symlinks
//! - `-v`  verbose transfer logging (streamed straight through)
//! - `--delete`  remove remote files that no longer exist locally
//!
//! Exclusions come from the repository's `.gitignore`, with one deliberate
//! exception: the `.git` directory is always transferred, so local commits
//! and branch switches show up on the remote without a separate push.

use std::fs;

use crate::context::SyncContext;
use crate::error::{SyncwipError, SyncwipResult};
use crate::process::{CommandRunner, Invocation};

/// Ignore file consulted for transfer exclusions.
pub const IGNORE_FILE: &str = ".gitignore";

const GIT_DIR: &str = ".git";

/// rsync flag set, combined short flags first.
pub const MIRROR_FLAGS: [&str; 2] = ["-rtlv", "--delete"];

/// Mirror transfer bound to a command runner.
pub struct Mirror<'r> {
    runner: &'r dyn CommandRunner,
    dry_run: bool,
}

impl<'r> Mirror<'r> {
    pub fn new(runner: &'r dyn CommandRunner, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    /// Build the rsync invocation for a context and exclusion set.
    pub fn invocation(context: &SyncContext, excludes: &[String], dry_run: bool) -> Invocation {
        let mut invocation = Invocation::new("rsync");
        for flag in MIRROR_FLAGS {
            invocation = invocation.arg(flag);
        }
        if dry_run {
            invocation = invocation.arg("--dry-run");
        }
        for exclude in excludes {
            invocation = invocation.arg(exclude);
        }

        // Trailing slashes: copy the contents of the root into the remote
        // directory, not the root directory itself.
        invocation
            .arg(format!("{}/", context.repo_root.display()))
            .arg(format!(
                "{}:{}/",
                context.remote_host,
                context.local_dir.display()
            ))
    }

    /// Run the mirror transfer. Fatal on non-zero exit; the remote tree is
    /// in an unknown state and the post-sync stage must not run.
    pub fn run(&self, context: &SyncContext) -> SyncwipResult<Invocation> {
        // A repository without an ignore file simply has no exclusions.
        let ignore_contents =
            fs::read_to_string(context.repo_root.join(IGNORE_FILE)).unwrap_or_default();
        let excludes = exclude_args(&ignore_contents);

        let invocation = Self::invocation(context, &excludes, self.dry_run);
        let exit = self.runner.stream(&invocation, &context.repo_root)?;

        if !exit.success {
            return Err(SyncwipError::Sync { code: exit.code });
        }
        Ok(invocation)
    }
}

/// Build `--exclude` arguments from ignore-file contents.
///
/// Blank lines and comments are dropped. Patterns naming the `.git`
/// directory itself are filtered out so repository history always transfers,
/// even when someone lists `.git` in the ignore file.
pub fn exclude_args(ignore_contents: &str) -> Vec<String> {
    ignore_contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !is_git_dir_pattern(line))
        .map(|pattern| format!("--exclude={pattern}"))
        .collect()
}

fn is_git_dir_pattern(pattern: &str) -> bool {
    pattern.trim_start_matches('/').trim_end_matches('/') == GIT_DIR
}
