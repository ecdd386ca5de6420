//! Test environment builder for isolated syncwip testing.
//!
//! Each `TestEnv` owns a temp directory holding a fake home (`<tmp>/tester`),
//! a repository under it (`<tmp>/tester/proj`), and a `bin/` directory of
//! stub tools that log their argv to files. The syncwip binary runs with
//! HOME/USER/PATH pointing into the environment, so every external call is
//! observable and none leaves the machine.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Login user the fake home belongs to.
pub const TEST_USER: &str = "tester";

/// Result of running the syncwip binary.
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated test environment with stubbed external tools.
pub struct TestEnv {
    root: TempDir,
    pub home: PathBuf,
    pub repo: PathBuf,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp root");
        let home = root.path().join(TEST_USER);
        let repo = home.join("proj");
        let bin = root.path().join("bin");
        fs::create_dir_all(&repo).expect("create repo dir");
        fs::create_dir_all(&bin).expect("create bin dir");

        let env = Self {
            root,
            home,
            repo,
            bin,
        };
        env.install_stub("git", GIT_STUB);
        env.install_stub("rsync", RSYNC_STUB);
        env.install_stub("ssh", SSH_STUB);
        env
    }

    fn install_stub(&self, name: &str, script: &str) {
        let path = self.bin.join(name);
        fs::write(&path, script).expect("write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    }

    fn log_path(&self, tool: &str) -> PathBuf {
        self.root.path().join(format!("{tool}.log"))
    }

    /// Recorded argv lines for a stub tool, one line per invocation.
    pub fn log(&self, tool: &str) -> String {
        fs::read_to_string(self.log_path(tool)).unwrap_or_default()
    }

    /// Write the repository ignore file.
    pub fn write_gitignore(&self, contents: &str) {
        fs::write(self.repo.join(".gitignore"), contents).expect("write .gitignore");
    }

    /// Run syncwip in the repo directory with extra environment variables.
    pub fn run_with_env(&self, args: &[&str], extra_env: &[(&str, &str)]) -> TestResult {
        let bin_path = format!(
            "{}:{}",
            self.bin.display(),
            std::env::var("PATH").unwrap_or_default()
        );

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_syncwip"));
        cmd.current_dir(&self.repo)
            .args(args)
            .env("HOME", &self.home)
            .env("USER", TEST_USER)
            .env("PATH", bin_path)
            .env("FAKE_REPO_ROOT", &self.repo)
            .env("FAKE_GIT_LOG", self.log_path("git"))
            .env("FAKE_RSYNC_LOG", self.log_path("rsync"))
            .env("FAKE_SSH_LOG", self.log_path("ssh"))
            .env_remove("FAKE_REMOTE")
            .env_remove("FAKE_POSTSYNC");

        for (key, value) in extra_env {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute syncwip");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run syncwip in the repo directory.
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Stub git: answers `rev-parse --show-toplevel` with `$FAKE_REPO_ROOT` and
/// `config --get syncwip.*` from `$FAKE_REMOTE` / `$FAKE_POSTSYNC`, exiting 1
/// for unset keys the way real git does.
const GIT_STUB: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_GIT_LOG"
case "$1" in
  rev-parse)
    printf '%s\n' "$FAKE_REPO_ROOT"
    ;;
  config)
    case "$3" in
      syncwip.remote)
        [ -n "$FAKE_REMOTE" ] || exit 1
        printf '%s\n' "$FAKE_REMOTE"
        ;;
      syncwip.postsync)
        [ -n "$FAKE_POSTSYNC" ] || exit 1
        printf '%s\n' "$FAKE_POSTSYNC"
        ;;
      *) exit 1 ;;
    esac
    ;;
  *) exit 1 ;;
esac
"#;

const RSYNC_STUB: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_RSYNC_LOG"
exit "${FAKE_RSYNC_EXIT:-0}"
"#;

const SSH_STUB: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_SSH_LOG"
exit "${FAKE_SSH_EXIT:-0}"
"#;

/// Whether a log contains a token as a whole argv word.
pub fn log_has_word(log: &str, word: &str) -> bool {
    log.lines()
        .any(|line| line.split(' ').any(|token| token == word))
}
