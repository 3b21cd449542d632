use colored::Colorize;
use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::warn;

use crate::App;
use crate::app::progress;
use crate::branch::parse_branch_list;
use crate::config::SweepMode;
use crate::error::SyncError;
use crate::ops::git::GitOps;

/// Result of a sweep. Per-branch failures are only reported here and in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Branches that were checked out and updated, in visiting order.
    pub updated: Vec<String>,
    /// Branches whose checkout or update failed.
    pub skipped: Vec<String>,
    /// Checkout active once the sweep finished.
    pub restored: String,
}

impl<G: GitOps> App<G> {
    /// Update every known branch, then return to the branch that was checked
    /// out when the sweep started.
    pub async fn sweep_branches(
        &self,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<SweepSummary> {
        let original = self.current_branch().await?;
        self.sweep_branches_restoring(&original, stdout).await
    }

    /// Visit each branch from `git branch --all` in order, check it out and
    /// pull (or fetch) it. A branch that fails either step is logged and
    /// skipped. Afterwards `restore_to` is checked out again no matter how the
    /// visits went; failing to do so is fatal.
    #[instrument(skip_all, fields(restore_to = %restore_to, mode = %self.config.sweep_mode))]
    pub async fn sweep_branches_restoring(
        &self,
        restore_to: &str,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<SweepSummary> {
        let visited = self.visit_branches(stdout).await;

        self.git.checkout(restore_to).await.map_err(|source| SyncError::RestoreCheckoutFailed {
            branch: restore_to.to_string(),
            source,
        })?;
        info!("restored original checkout");
        progress(stdout, format_args!("Restored checkout {}", restore_to));

        let (updated, skipped) = visited?;
        Ok(SweepSummary {
            updated,
            skipped,
            restored: restore_to.to_string(),
        })
    }

    async fn visit_branches(
        &self,
        stdout: &mut impl std::io::Write,
    ) -> anyhow::Result<(Vec<String>, Vec<String>)> {
        let listing = self
            .git
            .list_branches()
            .await
            .map_err(SyncError::BranchListUnavailable)?;

        let mut updated = vec![];
        let mut skipped = vec![];

        for branch in parse_branch_list(&listing) {
            debug!(branch = %branch.name, kind = ?branch.kind, "visiting branch");

            if let Err(e) = self.git.checkout(&branch.name).await {
                warn!(
                    branch = %branch.name,
                    error = %format!("{e:#}"),
                    "checkout failed, skipping branch"
                );
                progress(
                    stdout,
                    format_args!("{} {} (checkout failed)", "✗".red(), branch.name),
                );
                skipped.push(branch.name);
                continue;
            }

            let result = match self.config.sweep_mode {
                SweepMode::Pull => self.git.pull().await,
                SweepMode::Fetch => self.git.fetch().await,
            };
            match result {
                Ok(()) => {
                    progress(stdout, format_args!("{} {}", "↻".green(), branch.name));
                    updated.push(branch.name);
                }
                Err(e) => {
                    warn!(
                        branch = %branch.name,
                        error = %format!("{e:#}"),
                        "{} failed, moving on",
                        self.config.sweep_mode
                    );
                    progress(
                        stdout,
                        format_args!(
                            "{} {} ({} failed)",
                            "✗".red(),
                            branch.name,
                            self.config.sweep_mode
                        ),
                    );
                    skipped.push(branch.name);
                }
            }
        }

        Ok((updated, skipped))
    }
}
