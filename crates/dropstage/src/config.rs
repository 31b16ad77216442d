//! Options that shape how selected folders are traversed.

use serde::Deserialize;

/// Folder traversal options for a staging set.
///
/// The defaults list every non-hidden regular file under the selected
/// folder, ignore `.gitignore`-style files, and never follow symbolic links.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StagingOptions {
    /// Includes hidden files and descends into hidden directories.
    pub include_hidden: bool,
    /// Skips paths matched by `.gitignore`, `.ignore`, and git exclude files.
    pub respect_ignore_files: bool,
    /// Maximum walk depth, where the selected folder itself is depth `0`.
    pub max_depth: Option<usize>,
}

impl StagingOptions {
    /// Returns options with hidden files included or skipped.
    #[must_use]
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;

        self
    }

    /// Returns options that honour or ignore `.gitignore`-style files.
    #[must_use]
    pub fn with_ignore_files(mut self, respect_ignore_files: bool) -> Self {
        self.respect_ignore_files = respect_ignore_files;

        self
    }

    /// Returns options with the given maximum walk depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;

        self
    }
}
