#![allow(async_fn_in_trait)]

use anyhow::Result;
#[cfg(test)]
use mockall::automock;

use super::runner::CommandRunner;
use super::runner::ProcessRunner;

// -----------------------------------------------------------------------------
// GitOps trait

/// Operations for interacting with Git
#[cfg_attr(test, automock)]
pub trait GitOps {
    /// Read `user.name` from git config.
    async fn user_name(&self) -> Result<String>;

    /// Check whether a local branch with this name exists.
    async fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Create a branch at the current commit and switch to it.
    async fn create_branch(&self, branch: &str) -> Result<()>;

    /// Push a branch to `remote` and set it as upstream.
    async fn publish_branch(&self, branch: &str, remote: &str) -> Result<()>;

    /// Name of the checked-out branch, or the commit id on a detached HEAD.
    async fn current_branch(&self) -> Result<String>;

    async fn checkout(&self, branch: &str) -> Result<()>;

    /// Whether `git status --porcelain` reports anything.
    async fn has_changes(&self) -> Result<bool>;

    async fn stage_all(&self) -> Result<()>;
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push every local branch to its remote counterpart.
    async fn push_all(&self) -> Result<()>;

    /// Raw `git branch --all` output.
    async fn list_branches(&self) -> Result<String>;

    async fn pull(&self) -> Result<()>;
    async fn fetch(&self) -> Result<()>;
}

// -----------------------------------------------------------------------------
// RealGit

/// Real implementation that drives the git CLI through a [`CommandRunner`]
pub struct RealGit<R = ProcessRunner> {
    runner: R,
}

impl<R: CommandRunner> RealGit<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        self.runner.execute("git", args).await.check(&command)
    }
}

impl<R: CommandRunner> GitOps for RealGit<R> {
    async fn user_name(&self) -> Result<String> {
        Ok(self
            .git(&["config", "--get", "user.name"])
            .await?
            .trim()
            .to_string())
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool> {
        let refname = format!("refs/heads/{}", branch);
        let outcome = self
            .runner
            .execute("git", &["rev-parse", "--verify", "--quiet", &refname])
            .await;
        // Exit code 1 means the ref does not resolve; anything else is a real failure
        match outcome.status {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => outcome
                .check(&format!("git rev-parse --verify --quiet {}", refname))
                .map(|_| false),
        }
    }

    async fn create_branch(&self, branch: &str) -> Result<()> {
        self.git(&["checkout", "-b", branch]).await?;
        Ok(())
    }

    async fn publish_branch(&self, branch: &str, remote: &str) -> Result<()> {
        self.git(&["push", "-u", remote, branch]).await?;
        Ok(())
    }

    async fn current_branch(&self) -> Result<String> {
        let name = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        let name = name.trim();
        if name != "HEAD" {
            return Ok(name.to_string());
        }

        // Detached HEAD: remember the commit itself
        Ok(self.git(&["rev-parse", "HEAD"]).await?.trim().to_string())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.git(&["checkout", branch]).await?;
        Ok(())
    }

    async fn has_changes(&self) -> Result<bool> {
        let status = self.git(&["status", "--porcelain"]).await?;
        Ok(!status.trim().is_empty())
    }

    async fn stage_all(&self) -> Result<()> {
        self.git(&["add", "-A"]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message]).await?;
        Ok(())
    }

    async fn push_all(&self) -> Result<()> {
        self.git(&["push", "--all"]).await?;
        Ok(())
    }

    async fn list_branches(&self) -> Result<String> {
        self.git(&["branch", "--all"]).await
    }

    async fn pull(&self) -> Result<()> {
        self.git(&["pull"]).await?;
        Ok(())
    }

    async fn fetch(&self) -> Result<()> {
        self.git(&["fetch"]).await?;
        Ok(())
    }
}
