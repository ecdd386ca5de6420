//! Common test utilities for syncwip integration tests.
//!
//! Provides `TestEnv`: an isolated environment with a temp home, a repo
//! directory, and stub `git`/`rsync`/`ssh` executables on a private PATH
//! that record their arguments instead of touching the network.

#[cfg(unix)]
pub mod env;

#[cfg(unix)]
pub use env::*;
