//! Staged file entries, the snapshot handed to the sender, and staging
//! failures.

pub mod entry;
pub mod error;

pub use entry::{StagedEntry, StagedSnapshot};
pub use error::StagingError;
