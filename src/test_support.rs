//! In-memory repository used by the workflow tests.
//!
//! [`FakeRepo`] implements [`GitOps`] over a small model of a working copy:
//! local and published branches, the checked-out branch, a dirty flag, and
//! scripted failures. Every operation is appended to a call log.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Result;
use anyhow::bail;

use crate::ops::git::GitOps;

#[derive(Debug, Clone, Default)]
pub struct RepoState {
    pub identity: Option<String>,
    pub local: Vec<String>,
    pub remote: Vec<String>,
    /// Overrides the derived `git branch --all` output when set.
    pub listing: Option<String>,
    pub current: String,
    pub dirty: bool,
    /// (branch, message) for each commit made.
    pub commits: Vec<(String, String)>,
    pub push_all_count: usize,
    pub checkouts: Vec<String>,
    pub updated: Vec<String>,
    pub failing_checkouts: HashSet<String>,
    pub failing_updates: HashSet<String>,
    /// Operation names that fail: create, publish, status, stage, commit, push_all, list.
    pub failing_ops: HashSet<&'static str>,
    pub calls: Vec<String>,
}

/// Writer that fails like stdout after its reader has gone away.
pub struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

pub struct FakeRepo {
    state: Mutex<RepoState>,
}

impl FakeRepo {
    /// A repository with a single local and published branch, checked out.
    pub fn new(current: &str) -> Self {
        Self {
            state: Mutex::new(RepoState {
                identity: Some("alice".to_string()),
                local: vec![current.to_string()],
                remote: vec![current.to_string()],
                current: current.to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn with_identity(self, identity: Option<&str>) -> Self {
        self.lock().identity = identity.map(str::to_string);
        self
    }

    /// Add local branches that are also published.
    pub fn with_branches(self, branches: &[&str]) -> Self {
        {
            let mut state = self.lock();
            for branch in branches {
                state.local.push(branch.to_string());
                state.remote.push(branch.to_string());
            }
        }
        self
    }

    pub fn with_listing(self, listing: &str) -> Self {
        self.lock().listing = Some(listing.to_string());
        self
    }

    pub fn dirty(self) -> Self {
        self.lock().dirty = true;
        self
    }

    pub fn failing_checkout(self, branch: &str) -> Self {
        self.lock().failing_checkouts.insert(branch.to_string());
        self
    }

    pub fn failing_update(self, branch: &str) -> Self {
        self.lock().failing_updates.insert(branch.to_string());
        self
    }

    pub fn failing(self, op: &'static str) -> Self {
        self.lock().failing_ops.insert(op);
        self
    }

    pub fn state(&self) -> RepoState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, RepoState> {
        self.state.lock().unwrap()
    }

    fn record(&self, op: &'static str, call: String) -> Result<MutexGuard<'_, RepoState>> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing_ops.contains(op) {
            bail!("{} failed", op);
        }
        Ok(state)
    }
}

impl GitOps for FakeRepo {
    async fn user_name(&self) -> Result<String> {
        let state = self.record("identity", "config user.name".to_string())?;
        match &state.identity {
            Some(identity) => Ok(identity.clone()),
            None => bail!("git config --get user.name failed with exit status 1"),
        }
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool> {
        let state = self.record("verify", format!("verify {branch}"))?;
        Ok(state.local.iter().any(|b| b == branch))
    }

    async fn create_branch(&self, branch: &str) -> Result<()> {
        let mut state = self.record("create", format!("checkout -b {branch}"))?;
        if state.local.iter().any(|b| b == branch) {
            bail!("a branch named '{}' already exists", branch);
        }
        state.local.push(branch.to_string());
        state.current = branch.to_string();
        Ok(())
    }

    async fn publish_branch(&self, branch: &str, remote: &str) -> Result<()> {
        let mut state = self.record("publish", format!("push -u {remote} {branch}"))?;
        state.remote.push(branch.to_string());
        Ok(())
    }

    async fn current_branch(&self) -> Result<String> {
        let state = self.record("current", "current branch".to_string())?;
        Ok(state.current.clone())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        let mut state = self.record("checkout", format!("checkout {branch}"))?;
        let tracked = branch
            .strip_prefix("remotes/origin/")
            .is_some_and(|name| state.remote.iter().any(|b| b == name));
        let local = state.local.iter().any(|b| b == branch);
        if state.failing_checkouts.contains(branch) || !(local || tracked) {
            bail!("pathspec '{branch}' did not match any file(s) known to git");
        }
        state.current = branch.to_string();
        state.checkouts.push(branch.to_string());
        Ok(())
    }

    async fn has_changes(&self) -> Result<bool> {
        let state = self.record("status", "status --porcelain".to_string())?;
        Ok(state.dirty)
    }

    async fn stage_all(&self) -> Result<()> {
        self.record("stage", "add -A".to_string())?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        let mut state = self.record("commit", format!("commit -m {message}"))?;
        if !state.dirty {
            bail!("nothing to commit, working tree clean");
        }
        let branch = state.current.clone();
        state.commits.push((branch, message.to_string()));
        state.dirty = false;
        Ok(())
    }

    async fn push_all(&self) -> Result<()> {
        let mut state = self.record("push_all", "push --all".to_string())?;
        state.push_all_count += 1;
        for branch in state.local.clone() {
            if !state.remote.contains(&branch) {
                state.remote.push(branch);
            }
        }
        Ok(())
    }

    async fn list_branches(&self) -> Result<String> {
        let state = self.record("list", "branch --all".to_string())?;
        if let Some(listing) = &state.listing {
            return Ok(listing.clone());
        }
        let mut listing = String::new();
        for branch in &state.local {
            let marker = if *branch == state.current { "* " } else { "  " };
            listing.push_str(&format!("{marker}{branch}\n"));
        }
        for branch in &state.remote {
            listing.push_str(&format!("  remotes/origin/{branch}\n"));
        }
        Ok(listing)
    }

    async fn pull(&self) -> Result<()> {
        let mut state = self.record("pull", "pull".to_string())?;
        let current = state.current.clone();
        if state.failing_updates.contains(&current) {
            bail!("could not pull {}", current);
        }
        state.updated.push(current);
        Ok(())
    }

    async fn fetch(&self) -> Result<()> {
        let mut state = self.record("fetch", "fetch".to_string())?;
        let current = state.current.clone();
        if state.failing_updates.contains(&current) {
            bail!("could not fetch {}", current);
        }
        state.updated.push(current);
        Ok(())
    }
}
