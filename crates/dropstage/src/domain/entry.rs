//! Staged entries and the immutable snapshot handed to the sender.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// One file queued for sending.
///
/// The entry owns a shared read handle opened at add-time. The handle is
/// closed once the staging set and every snapshot holding the entry have
/// dropped it.
#[derive(Clone, Debug)]
pub struct StagedEntry {
    absolute_path: PathBuf,
    file: Arc<File>,
    /// Destination-side directory, `/`-separated. Empty means top level.
    relative_directory: String,
    size: u64,
}

impl StagedEntry {
    pub(crate) fn new(
        absolute_path: PathBuf,
        relative_directory: String,
        file: File,
        size: u64,
    ) -> Self {
        Self {
            absolute_path,
            file: Arc::new(file),
            relative_directory,
            size,
        }
    }

    /// Returns the absolute source path resolved when the file was staged.
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Returns the directory the file is recreated under at the destination.
    pub fn relative_directory(&self) -> &str {
        &self.relative_directory
    }

    /// Returns the byte length observed when the file was staged.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the read handle opened while validating the file.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Returns the base name of the source file.
    pub fn file_name(&self) -> String {
        self.absolute_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the destination-relative name shown in the staged list, e.g.
    /// `X/sub/b.txt`, or just the base name for top-level files.
    pub fn display_name(&self) -> String {
        let file_name = self.file_name();
        if self.relative_directory.is_empty() {
            return file_name;
        }

        format!("{}/{file_name}", self.relative_directory)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry<'a> {
    path: &'a Path,
    relative_directory: &'a str,
    display_name: String,
    size: u64,
}

impl Serialize for StagedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ManifestEntry {
            path: &self.absolute_path,
            relative_directory: &self.relative_directory,
            display_name: self.display_name(),
            size: self.size,
        }
        .serialize(serializer)
    }
}

/// Point-in-time copy of the staged set handed to the sender.
///
/// Later changes to the staging set never show up here.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct StagedSnapshot {
    entries: Vec<StagedEntry>,
}

impl StagedSnapshot {
    pub(crate) fn new(entries: Vec<StagedEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StagedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StagedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the combined byte length of every staged file.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(StagedEntry::size).sum()
    }

    pub fn into_entries(self) -> Vec<StagedEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a StagedSnapshot {
    type Item = &'a StagedEntry;
    type IntoIter = std::slice::Iter<'a, StagedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
