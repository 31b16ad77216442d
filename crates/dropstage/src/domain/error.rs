//! Failures raised while staging files.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures raised while staging files or confirming the staged set.
///
/// None of these are fatal. Per-file failures are reported and the bulk
/// operation continues with the next candidate.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The candidate is missing or could not be opened for reading.
    #[error("Unable to open file {}. Skipping.", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The candidate is a directory, pipe, device, or socket.
    #[error("{} is not a regular file. Skipping.", .path.display())]
    NotRegularFile { path: PathBuf },
    /// Part of a selected folder could not be read during traversal.
    #[error("Unable to read folder {}: {message}", .root.display())]
    Traverse { root: PathBuf, message: String },
    /// Confirmation was requested while nothing is staged.
    #[error("No file to be sent.")]
    EmptySet,
}

impl StagingError {
    /// Returns the path the failure refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } | Self::NotRegularFile { path } => Some(path),
            Self::Traverse { root, .. } => Some(root),
            Self::EmptySet => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_message_names_path() {
        // Arrange
        let error = StagingError::Open {
            path: PathBuf::from("/tmp/missing.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        // Act
        let message = error.to_string();

        // Assert
        assert_eq!(message, "Unable to open file /tmp/missing.txt. Skipping.");
        assert_eq!(error.path(), Some(Path::new("/tmp/missing.txt")));
    }

    #[test]
    fn test_empty_set_has_no_path() {
        // Arrange
        let error = StagingError::EmptySet;

        // Act
        let path = error.path();

        // Assert
        assert!(path.is_none());
        assert_eq!(error.to_string(), "No file to be sent.");
    }
}
