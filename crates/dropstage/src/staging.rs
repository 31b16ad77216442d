//! Ordered, deduplicated set of files queued for sending.

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StagingOptions;
use crate::domain::{StagedEntry, StagedSnapshot, StagingError};
use crate::infra::path::normalize_path;
use crate::infra::walk::{RegularFileWalk, WalkedFile};

/// Files queued for sending, in insertion order and keyed by normalized
/// absolute path.
///
/// Every entry pointed at a readable regular file when it was added and holds
/// the handle opened at that time. Removing an entry or dropping the set
/// releases its handle unless a snapshot still shares it.
#[derive(Debug, Default)]
pub struct FileStagingSet {
    entries: Vec<StagedEntry>,
    /// Normalized absolute paths of `entries`.
    index: HashSet<PathBuf>,
    options: StagingOptions,
}

impl FileStagingSet {
    /// Creates an empty set with default traversal options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set whose folder walks follow `options`.
    pub fn with_options(options: StagingOptions) -> Self {
        Self {
            entries: Vec::new(),
            index: HashSet::new(),
            options,
        }
    }

    /// Returns the traversal options used by [`Self::add_directory`].
    pub fn options(&self) -> &StagingOptions {
        &self.options
    }

    /// Stages `candidate` to be recreated under `relative_directory`.
    ///
    /// The path is made absolute and `.`/`..` components are resolved before
    /// the duplicate check, so `a.txt` and `sub/../a.txt` are the same entry.
    /// Adding a path that is already staged succeeds without creating a
    /// second entry.
    ///
    /// # Errors
    /// Returns [`StagingError::Open`] when the path is missing or cannot be
    /// opened for reading, and [`StagingError::NotRegularFile`] when it is a
    /// directory, pipe, device, or socket.
    pub fn add(
        &mut self,
        candidate: &Path,
        relative_directory: &str,
    ) -> Result<(), StagingError> {
        let absolute_path = normalize_path(candidate).map_err(|source| StagingError::Open {
            path: candidate.to_path_buf(),
            source,
        })?;

        if self.index.contains(&absolute_path) {
            debug!(path = %absolute_path.display(), "File already staged");

            return Ok(());
        }

        let (file, size) = open_regular_file(&absolute_path)?;
        debug!(
            path = %absolute_path.display(),
            relative_directory,
            size,
            "Staged file"
        );
        self.index.insert(absolute_path.clone());
        self.entries.push(StagedEntry::new(
            absolute_path,
            relative_directory.to_string(),
            file,
            size,
        ));

        Ok(())
    }

    /// Stages every candidate under the same `relative_directory`.
    ///
    /// A failing candidate never stops the remaining ones. Returns the
    /// failures in the order they happened.
    pub fn add_all<I, P>(&mut self, candidates: I, relative_directory: &str) -> Vec<StagingError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                self.add(candidate.as_ref(), relative_directory)
                    .err()
                    .inspect(|error| warn!("{error}"))
            })
            .collect()
    }

    /// Stages every regular file below `root`, keeping `root`'s own name as
    /// the top destination directory.
    ///
    /// `root` is normalized first, so `X/sub/..`, `X/.`, and `X/` all stage
    /// under `X`. Unreadable files and directories are skipped. Returns every
    /// failure met during the walk.
    pub fn add_directory(&mut self, root: &Path) -> Vec<StagingError> {
        let root = match normalize_path(root) {
            Ok(root) => root,
            Err(error) => {
                return vec![StagingError::Traverse {
                    root: root.to_path_buf(),
                    message: error.to_string(),
                }];
            }
        };

        let staged_before = self.entries.len();
        let mut failures = Vec::new();
        for walked in RegularFileWalk::new(&root, &self.options) {
            let result = walked.and_then(|walked_file: WalkedFile| {
                self.add(&walked_file.path, &walked_file.relative_directory)
            });

            if let Err(error) = result {
                warn!("{error}");
                failures.push(error);
            }
        }

        info!(
            root = %root.display(),
            staged = self.entries.len() - staged_before,
            failed = failures.len(),
            "Staged folder"
        );

        failures
    }

    /// Removes the entries at `indices` in one step.
    ///
    /// Selected rows are resolved to their absolute paths before anything is
    /// removed, so earlier removals never shift later selections. Indices
    /// past the end are ignored. Returns the number of removed entries.
    pub fn remove<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let selected: HashSet<PathBuf> = indices
            .into_iter()
            .filter_map(|index| {
                let entry = self.entries.get(index);
                if entry.is_none() {
                    debug!(index, "Ignoring stale selection index");
                }

                entry.map(|entry| entry.absolute_path().to_path_buf())
            })
            .collect();

        let staged_before = self.entries.len();
        self.entries
            .retain(|entry| !selected.contains(entry.absolute_path()));
        self.index.retain(|path| !selected.contains(path));
        let removed = staged_before - self.entries.len();
        debug!(removed, "Removed staged files");

        removed
    }

    /// Returns an immutable copy of the staged files for the sender.
    ///
    /// # Errors
    /// Returns [`StagingError::EmptySet`] and leaves the set untouched when
    /// nothing is staged.
    pub fn snapshot(&self) -> Result<StagedSnapshot, StagingError> {
        if self.entries.is_empty() {
            return Err(StagingError::EmptySet);
        }

        Ok(StagedSnapshot::new(self.entries.clone()))
    }

    /// Returns the display name of each staged file, in order.
    pub fn display_names(&self) -> Vec<String> {
        self.entries.iter().map(StagedEntry::display_name).collect()
    }

    pub fn entries(&self) -> &[StagedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the normalized form of `path` is already staged.
    pub fn contains(&self, path: &Path) -> bool {
        normalize_path(path).is_ok_and(|absolute_path| self.index.contains(&absolute_path))
    }

    /// Drops every entry and its handle.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Opens `path` for reading after confirming it is a regular file.
///
/// The type is checked before opening so a named pipe is never opened, which
/// would block until a writer appears. The handle's own metadata is checked
/// again in case the path was swapped in between.
fn open_regular_file(path: &Path) -> Result<(File, u64), StagingError> {
    let open_error = |source| StagingError::Open {
        path: path.to_path_buf(),
        source,
    };
    let not_regular = || StagingError::NotRegularFile {
        path: path.to_path_buf(),
    };

    if !fs::metadata(path).map_err(open_error)?.is_file() {
        return Err(not_regular());
    }

    let file = File::open(path).map_err(open_error)?;
    let metadata = file.metadata().map_err(open_error)?;
    if !metadata.is_file() {
        return Err(not_regular());
    }

    Ok((file, metadata.len()))
}
