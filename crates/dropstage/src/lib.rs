//! Staging of files and folders chosen for a local-network send.

pub mod config;
pub mod dialog;
pub mod domain;
pub mod infra;
pub mod staging;

pub use config::StagingOptions;
pub use domain::{StagedEntry, StagedSnapshot, StagingError};
pub use staging::FileStagingSet;
