//! Subprocess execution seam.
//!
//! Everything syncwip does happens through external tools (git, rsync, ssh).
//! `CommandRunner` is the single choke point for spawning them, so the
//! pipeline can be unit tested against a recording fake without touching
//! the system. Arguments travel as structured lists, never as a locally
//! interpreted shell string.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::SyncwipResult;

/// Invocation of an external tool as a structured argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Render for logging. Never passed to a shell.
    pub fn display(&self) -> String {
        let mut s = self.program.clone();
        for arg in &self.args {
            s.push(' ');
            s.push_str(arg);
        }
        s
    }
}

/// Captured result of a subprocess whose stdout was collected.
#[derive(Debug, Clone)]
pub struct Captured {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Exit of a subprocess whose stdio streams were inherited.
#[derive(Debug, Clone, Copy)]
pub struct Exit {
    pub success: bool,
    pub code: Option<i32>,
}

/// Spawns external tools.
///
/// Each call blocks until the child exits; there is no timeout or
/// cancellation, matching the interactive nature of the tool.
pub trait CommandRunner {
    /// Run with stdout and stderr captured.
    fn capture(&self, invocation: &Invocation, cwd: &Path) -> SyncwipResult<Captured>;

    /// Run with stdio inherited, streaming output straight through.
    fn stream(&self, invocation: &Invocation, cwd: &Path) -> SyncwipResult<Exit>;
}

/// Production runner backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, invocation: &Invocation, cwd: &Path) -> SyncwipResult<Captured> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(Captured {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn stream(&self, invocation: &Invocation, cwd: &Path) -> SyncwipResult<Exit> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit()) // allow ssh password prompts
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(Exit {
            success: status.success(),
            code: status.code(),
        })
    }
}
