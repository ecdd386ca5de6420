//! The four-stage pipeline: resolve root, resolve remote, mirror, post-sync.
//!
//! Strictly sequential; each stage blocks on its subprocess and a fatal
//! error aborts everything after it. The resolved `SyncContext` is built
//! once and passed forward, never mutated.

use std::path::Path;

use crate::context::{HomeLayout, SyncContext};
use crate::error::{SyncwipError, SyncwipResult};
use crate::git::{Git, POST_SYNC_KEY, REMOTE_KEY};
use crate::mirror::Mirror;
use crate::output::Output;
use crate::process::CommandRunner;
use crate::remote::PostSync;

/// Knobs for a single pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Host from the command line; when set, the `syncwip.remote` config
    /// lookup is never issued.
    pub explicit_host: Option<String>,
    /// Pass `--dry-run` to rsync and skip the post-sync stage.
    pub dry_run: bool,
    /// Skip the per-user home layout check.
    pub skip_home_check: bool,
}

/// What a completed run did.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub context: SyncContext,
    pub post_sync_ran: bool,
}

/// Run the whole pipeline from a working directory.
pub fn run(
    runner: &dyn CommandRunner,
    out: &Output,
    layout: &HomeLayout,
    cwd: &Path,
    options: &PipelineOptions,
) -> SyncwipResult<PipelineOutcome> {
    let git = Git::new(runner, cwd);

    // Stage 1: repository root.
    let repo_root = git.repo_root()?;
    out.detail(&format!("repo root: {}", repo_root.display()));

    // The layout check runs before anything remote-facing so a bad
    // environment fails with one subprocess spawned, not three.
    let mut layout = layout.clone();
    if options.skip_home_check {
        layout.require_user_suffix = false;
    }
    layout.validate()?;
    let local_dir = layout.local_dir(&repo_root)?;
    out.detail(&format!("local dir: {}", local_dir.display()));

    // Stage 2: remote host. Explicit argument wins verbatim.
    let remote_host = match &options.explicit_host {
        Some(host) => host.clone(),
        None => git
            .config(REMOTE_KEY)?
            .ok_or(SyncwipError::RemoteUnresolved)?,
    };
    out.detail(&format!("remote host: {remote_host}"));

    let context = SyncContext {
        repo_root,
        remote_host,
        local_dir,
    };

    // Stage 3: mirror transfer.
    out.syncing(
        &context.local_dir.display().to_string(),
        &context.remote_host,
    );
    let invocation = Mirror::new(runner, options.dry_run).run(&context)?;
    out.command(&invocation.display());

    // Stage 4: post-sync command. A dry run must not mutate the remote.
    if options.dry_run {
        return Ok(PipelineOutcome {
            context,
            post_sync_ran: false,
        });
    }

    let post_sync = git.config(POST_SYNC_KEY)?;
    let post_sync_ran = PostSync::new(runner).run(&context, post_sync.as_deref())?;

    Ok(PipelineOutcome {
        context,
        post_sync_ran,
    })
}
