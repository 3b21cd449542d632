use tracing::info;
use tracing::instrument;

use crate::App;
use crate::app::progress;
use crate::error::SyncError;
use crate::ops::git::GitOps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    NothingToCommit,
    /// Changes were committed on `branch` and every branch was pushed.
    Committed { branch: String },
}

impl<G: GitOps> App<G> {
    /// Commit and publish any pending modifications.
    ///
    /// The commit lands on the checked-out branch, but the push publishes all
    /// branches. Staging, commit and push failures are fatal.
    #[instrument(skip_all)]
    pub async fn commit_changes(
        &self,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<CommitOutcome> {
        let state = self.working_copy_state().await?;
        if !state.is_dirty {
            info!("working copy clean");
            progress(stdout, format_args!("No changes to commit"));
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.git.stage_all().await.map_err(SyncError::StageFailed)?;
        self.git
            .commit(&self.config.commit_message)
            .await
            .map_err(|source| SyncError::CommitFailed {
                branch: state.current_branch.clone(),
                source,
            })?;
        info!(branch = %state.current_branch, "committed pending changes");
        progress(
            stdout,
            format_args!("Committed changes on {}", state.current_branch),
        );

        self.git.push_all().await.map_err(SyncError::PushFailed)?;
        progress(stdout, format_args!("Pushed all branches"));

        Ok(CommitOutcome::Committed {
            branch: state.current_branch,
        })
    }
}
