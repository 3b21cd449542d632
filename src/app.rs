use tracing::warn;

use crate::branch::BranchName;
use crate::branch::WorkingCopyState;
use crate::config::Config;
use crate::error::Result;
use crate::error::SyncError;
use crate::ops::git::GitOps;

pub struct App<G: GitOps> {
    pub config: Config,
    pub git: G,
}

impl<G: GitOps> App<G> {
    pub fn new(config: Config, git: G) -> Self {
        Self { config, git }
    }
}

/// Shared helper methods for App
impl<G: GitOps> App<G> {
    /// Read the operator identity and derive their branch name from it.
    pub async fn branch_name(&self) -> Result<BranchName> {
        let identity = self
            .git
            .user_name()
            .await
            .map_err(SyncError::IdentityUnavailable)?;
        BranchName::from_identity(&identity)
    }

    pub(crate) async fn current_branch(&self) -> Result<String> {
        self.git
            .current_branch()
            .await
            .map_err(SyncError::CurrentBranchUnavailable)
    }

    /// Snapshot which branch is checked out and whether there is anything to commit.
    pub async fn working_copy_state(&self) -> Result<WorkingCopyState> {
        let current_branch = self.current_branch().await?;
        let is_dirty = self
            .git
            .has_changes()
            .await
            .map_err(SyncError::StatusUnavailable)?;
        Ok(WorkingCopyState {
            current_branch,
            is_dirty,
        })
    }
}

/// Write one progress line.
///
/// Progress output never decides the outcome of a run: a failed write (e.g. a
/// closed pipe) is logged and the git sequence carries on.
pub(crate) fn progress(stdout: &mut impl std::io::Write, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(stdout, "{line}") {
        warn!(error = %e, "could not write progress output");
    }
}
