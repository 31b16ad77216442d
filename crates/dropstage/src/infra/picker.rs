//! File and folder picker boundary.

use std::collections::VecDeque;
use std::path::PathBuf;

/// Source of user-chosen paths, normally the OS-native pickers.
#[cfg_attr(test, mockall::automock)]
pub trait FilePicker {
    /// Returns the chosen files, or an empty list when the user cancels.
    fn pick_files(&mut self) -> Vec<PathBuf>;

    /// Returns the chosen folder, or `None` when the user cancels.
    fn pick_folder(&mut self) -> Option<PathBuf>;
}

/// Picker that answers from paths chosen up front, e.g. on a command line.
///
/// The file list is handed out once. Folders are handed out one per
/// [`FilePicker::pick_folder`] call, in order.
#[derive(Debug, Default)]
pub struct PresetPicker {
    files: Vec<PathBuf>,
    folders: VecDeque<PathBuf>,
}

impl PresetPicker {
    pub fn new(files: Vec<PathBuf>, folders: Vec<PathBuf>) -> Self {
        Self {
            files,
            folders: folders.into(),
        }
    }
}

impl FilePicker for PresetPicker {
    fn pick_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.files)
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.folders.pop_front()
    }
}
