//! The stages of a sync run, each implemented as methods on [`crate::App`].

pub mod commit;
pub mod ensure;
pub mod sweep;
pub mod sync;
