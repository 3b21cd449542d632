use tracing::info;
use tracing::instrument;

use crate::App;
use crate::app::progress;
use crate::branch::BranchName;
use crate::error::SyncError;
use crate::ops::git::GitOps;

/// What [`App::ensure_branch`] had to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The branch did not exist; it was created, checked out and published.
    Created,
    /// The branch existed and another branch was checked out.
    Switched { from: String },
    AlreadyCurrent,
}

impl<G: GitOps> App<G> {
    /// Make `branch` the checked-out branch.
    ///
    /// 1. If no local branch has this name, create it at the current commit,
    ///    switch to it, and publish it with upstream tracking.
    /// 2. Otherwise switch to it unless it is already checked out.
    ///
    /// Every failure here is fatal: without the operator's branch there is
    /// nowhere to commit to.
    #[instrument(skip_all, fields(branch = %branch))]
    pub async fn ensure_branch(
        &self,
        branch: &BranchName,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<EnsureOutcome> {
        let name = branch.as_str();

        let exists = self
            .git
            .branch_exists(name)
            .await
            .map_err(|source| SyncError::BranchLookupFailed {
                branch: name.to_string(),
                source,
            })?;

        if !exists {
            self.git.create_branch(name).await.map_err(|source| SyncError::BranchCreationFailed {
                branch: name.to_string(),
                source,
            })?;
            info!("created branch");
            progress(stdout, format_args!("Created branch {}", name));

            let remote = &self.config.remote;
            self.git
                .publish_branch(name, remote)
                .await
                .map_err(|source| SyncError::BranchPublishFailed {
                    branch: name.to_string(),
                    remote: remote.clone(),
                    source,
                })?;
            info!(%remote, "published branch");
            progress(
                stdout,
                format_args!("Published branch {} to {}", name, remote),
            );

            return Ok(EnsureOutcome::Created);
        }

        let current = self.current_branch().await?;
        if current == name {
            progress(stdout, format_args!("Already on branch {}", name));
            return Ok(EnsureOutcome::AlreadyCurrent);
        }

        self.git.checkout(name).await.map_err(|source| SyncError::CheckoutFailed {
            branch: name.to_string(),
            source,
        })?;
        info!(from = %current, "switched branch");
        progress(
            stdout,
            format_args!("Switched from {} to {}", current, name),
        );

        Ok(EnsureOutcome::Switched { from: current })
    }
}
