//! syncwip - mirror a work-in-progress git repository to a remote host
//!
//! syncwip orchestrates three external tools: git (repository root and
//! configuration), rsync (one-way mirror transfer), and ssh (optional
//! post-sync command). It keeps no state of its own; every invocation
//! resolves everything fresh and runs the stages strictly in sequence.

pub mod context;
pub mod error;
pub mod git;
pub mod mirror;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod remote;

// Re-exports for convenience
pub use context::{HomeLayout, SyncContext};
pub use error::{SyncwipError, SyncwipResult};
pub use pipeline::{PipelineOptions, PipelineOutcome};
pub use process::{CommandRunner, Invocation, SystemRunner};
