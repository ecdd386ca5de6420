//! syncwip CLI - mirror a work-in-progress repository to a remote host
//!
//! Usage: syncwip [HOST]
//!
//! Resolves the repository root via git, mirrors it to HOST (or the host in
//! `git config syncwip.remote`) with rsync, then runs the optional
//! `git config syncwip.postsync` command on the remote via ssh.

use clap::Parser;

use syncwip::output::Output;
use syncwip::pipeline::{self, PipelineOptions};
use syncwip::{HomeLayout, SyncwipError, SystemRunner};

/// syncwip - mirror a work-in-progress repository to a remote host
#[derive(Parser, Debug)]
#[command(name = "syncwip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Remote host or ssh alias; defaults to `git config syncwip.remote`
    host: Option<String>,

    /// Show what rsync would transfer without touching the remote
    #[arg(long)]
    dry_run: bool,

    /// Skip the check that HOME is the per-user directory of USER
    #[arg(long)]
    no_home_check: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    let out = Output::new(cli.verbose);

    std::process::exit(run(&cli, &out));
}

fn run(cli: &Cli, out: &Output) -> i32 {
    let options = PipelineOptions {
        explicit_host: cli.host.clone(),
        dry_run: cli.dry_run,
        skip_home_check: cli.no_home_check,
    };

    let result = HomeLayout::from_env()
        .and_then(|layout| {
            let cwd = std::env::current_dir()?;
            pipeline::run(&SystemRunner, out, &layout, &cwd, &options)
        });

    match result {
        Ok(outcome) => {
            out.done(&outcome.context.remote_host);
            0
        }
        // The mirror already succeeded by the time the post-sync command
        // fails; report it without pretending the sync itself broke.
        Err(err @ SyncwipError::RemoteExec { .. }) => {
            out.warn(&format!("sync completed, but {err}"));
            err.exit_code()
        }
        Err(err) => {
            out.error(&err.to_string());
            err.exit_code()
        }
    }
}
