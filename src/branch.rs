use std::fmt::Display;

use crate::error::SyncError;

/// Appended to the operator identity to form their branch name.
pub const BRANCH_SUFFIX: &str = "_branch";

/// Marker `git branch` puts in front of the checked-out branch.
const CURRENT_MARKER: &str = "* ";

const REMOTE_PREFIX: &str = "remotes/";

// -----------------------------------------------------------------------------
// BranchName

/// The per-operator branch, derived from the configured identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Derive the branch name for an identity: the trimmed identity followed
    /// by [`BRANCH_SUFFIX`]. A blank identity is treated as unavailable.
    pub fn from_identity(identity: &str) -> Result<Self, SyncError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(SyncError::IdentityUnavailable(anyhow::anyhow!(
                "user.name is empty"
            )));
        }
        Ok(Self(format!("{identity}{BRANCH_SUFFIX}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------------------------------------
// Branch listing

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Local,
    RemoteTracking,
}

/// One entry of the branch enumeration, normalized so it can be checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub kind: BranchKind,
}

impl Branch {
    fn from_listing_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        let name = trimmed
            .strip_prefix(CURRENT_MARKER)
            .unwrap_or(trimmed)
            .trim();
        if name.is_empty() {
            return None;
        }
        let kind = if name.starts_with(REMOTE_PREFIX) {
            BranchKind::RemoteTracking
        } else {
            BranchKind::Local
        };
        Some(Self {
            name: name.to_string(),
            kind,
        })
    }
}

/// Lazily parse `git branch --all` output into branches, in listing order.
///
/// Blank lines are dropped; duplicates are kept.
pub fn parse_branch_list(listing: &str) -> impl Iterator<Item = Branch> + '_ {
    listing.lines().filter_map(Branch::from_listing_line)
}

// -----------------------------------------------------------------------------
// WorkingCopyState

/// Snapshot of the working copy taken before a stage mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopyState {
    /// Branch (or detached commit) that is checked out.
    pub current_branch: String,
    pub is_dirty: bool,
}
