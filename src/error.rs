//! Fatal errors that abort a sync run.
//!
//! Recoverable failures during the sweep never become a [`SyncError`]; they
//! are logged against the branch they concern and the sweep moves on.

use thiserror::Error;

/// Every way a run can fail for good. The display text names the stage.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not read the operator identity from git config")]
    IdentityUnavailable(#[source] anyhow::Error),

    #[error("could not determine the current checkout")]
    CurrentBranchUnavailable(#[source] anyhow::Error),

    #[error("could not look up branch {branch}")]
    BranchLookupFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to create branch {branch}")]
    BranchCreationFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to publish branch {branch} to {remote}")]
    BranchPublishFailed {
        branch: String,
        remote: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to check out branch {branch}")]
    CheckoutFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not read working copy status")]
    StatusUnavailable(#[source] anyhow::Error),

    #[error("failed to stage pending changes")]
    StageFailed(#[source] anyhow::Error),

    #[error("failed to commit pending changes on {branch}")]
    CommitFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to push branches to the remote")]
    PushFailed(#[source] anyhow::Error),

    #[error("could not enumerate branches")]
    BranchListUnavailable(#[source] anyhow::Error),

    #[error("failed to restore the original checkout {branch}")]
    RestoreCheckoutFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
