//! Progress output for the interactive pipeline.
//!
//! Plain line-oriented output: stage announcements on stdout, warnings and
//! errors on stderr. Unicode icons when stdout is a terminal, ascii
//! otherwise. Verbosity gates the command echo (`-v`) and resolution
//! details (`-vv`).

use is_terminal::IsTerminal;

struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "⚠",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[!]",
            arrow: "->",
        }
    }
}

/// Line-oriented renderer for pipeline progress.
pub struct Output {
    verbose: u8,
    icons: Icons,
}

impl Output {
    pub fn new(verbose: u8) -> Self {
        let icons = if std::io::stdout().is_terminal() {
            Icons::unicode()
        } else {
            Icons::ascii()
        };
        Self { verbose, icons }
    }

    /// Announce the transfer about to happen.
    pub fn syncing(&self, local_dir: &str, host: &str) {
        println!("Syncing {} {} {}", local_dir, self.icons.arrow, host);
    }

    /// Final success line.
    pub fn done(&self, host: &str) {
        println!("{} Synced to {}", self.icons.check, host);
    }

    /// Echo an external command line (`-v`).
    pub fn command(&self, rendered: &str) {
        if self.verbose >= 1 {
            println!("+ {rendered}");
        }
    }

    /// Resolution detail (`-vv`).
    pub fn detail(&self, message: &str) {
        if self.verbose >= 2 {
            println!("  {message}");
        }
    }

    /// Non-fatal problem, reported on stderr.
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.icons.warn, message);
    }

    /// Fatal problem, reported on stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.icons.cross, message);
    }
}
