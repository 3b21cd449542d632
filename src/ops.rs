//! Integration layer for the version-control system the agent drives.
//!
//! - [`runner`]: Executes external commands and reports their output and exit status
//! - [`git`]: Typed Git operations (identity, branches, status, commit, push, pull) built on a runner
//!
//! [`git::GitOps`] is the seam the sync stages depend on, with a real implementation
//! and a mock for testing.

pub mod git;
pub mod runner;
