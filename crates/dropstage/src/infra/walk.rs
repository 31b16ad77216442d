//! Recursive folder traversal for staging whole directory trees.

use std::path::{Path, PathBuf};

use ignore::{Walk, WalkBuilder};

use crate::config::StagingOptions;
use crate::domain::StagingError;

/// A regular file found under a selected folder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Parent directory of `path` relative to the selected folder's parent.
    pub relative_directory: String,
}

/// Iterator over every regular file below a selected folder.
///
/// Symbolic links are reported as neither files nor directories and are
/// skipped. Each unreadable part of the tree yields one
/// [`StagingError::Traverse`] and the walk moves on.
pub struct RegularFileWalk {
    root: PathBuf,
    walk: Walk,
}

impl RegularFileWalk {
    /// Starts a walk of `root` shaped by `options`.
    pub fn new(root: &Path, options: &StagingOptions) -> Self {
        let respect_ignore_files = options.respect_ignore_files;
        let walk = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .ignore(respect_ignore_files)
            .git_ignore(respect_ignore_files)
            .git_exclude(respect_ignore_files)
            .parents(respect_ignore_files)
            .require_git(false)
            .follow_links(false)
            .max_depth(options.max_depth)
            .build();

        Self {
            root: root.to_path_buf(),
            walk,
        }
    }
}

impl Iterator for RegularFileWalk {
    type Item = Result<WalkedFile, StagingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walk.next()? {
                Ok(entry) => {
                    if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
                        continue;
                    }

                    let path = entry.into_path();
                    let relative_directory = relative_directory(&self.root, &path);

                    return Some(Ok(WalkedFile {
                        path,
                        relative_directory,
                    }));
                }
                Err(error) => {
                    return Some(Err(StagingError::Traverse {
                        root: self.root.clone(),
                        message: error.to_string(),
                    }));
                }
            }
        }
    }
}

/// Computes the destination directory for `file` found under `root`.
///
/// The result is `file`'s parent relative to `root`'s parent, so the selected
/// folder's own name stays the top level: root `/a/X` and file
/// `/a/X/sub/f.txt` give `X/sub`. A root without a parent (the filesystem
/// root) is its own base.
pub fn relative_directory(root: &Path, file: &Path) -> String {
    let base = root.parent().unwrap_or(root);
    let Some(parent) = file.parent() else {
        return String::new();
    };

    parent
        .strip_prefix(base)
        .map(|relative| {
            relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
