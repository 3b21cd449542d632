use tracing::info;
use tracing::instrument;

use crate::App;
use crate::branch::BranchName;
use crate::ops::git::GitOps;

use super::commit::CommitOutcome;
use super::ensure::EnsureOutcome;
use super::sweep::SweepSummary;

/// Everything a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub branch: BranchName,
    pub ensure: EnsureOutcome,
    pub commit: CommitOutcome,
    pub sweep: SweepSummary,
}

impl<G: GitOps> App<G> {
    /// Run the whole synchronization.
    ///
    /// 1. Derive the operator's branch from `user.name`.
    /// 2. Make it the checked-out branch, creating and publishing it if needed.
    /// 3. Commit pending changes there and push all branches.
    /// 4. Pull every branch, then check out whatever was checked out when
    ///    the run started.
    ///
    /// Steps 1-3 abort the run on failure. In step 4 only the final
    /// restoration can abort it.
    #[instrument(skip_all)]
    pub async fn cmd_sync(
        &self,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<SyncReport> {
        let branch = self.branch_name().await?;
        info!(%branch, "syncing");

        let original = self.current_branch().await?;

        let ensure = self.ensure_branch(&branch, stdout).await?;
        let commit = self.commit_changes(stdout).await?;
        let sweep = self.sweep_branches_restoring(&original, stdout).await?;

        Ok(SyncReport {
            branch,
            ensure,
            commit,
            sweep,
        })
    }
}
