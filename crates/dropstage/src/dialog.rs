//! Toolkit-independent controller behind the "select files to send" dialog.
//!
//! Buttons, drops, and confirmation map to explicit method calls. Pickers,
//! message boxes, and the sender are injected so any UI layer can drive it.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::config::StagingOptions;
use crate::domain::StagingError;
use crate::infra::notify::Notifier;
use crate::infra::picker::FilePicker;
use crate::infra::send::{Discovery, SendLauncher};
use crate::staging::FileStagingSet;

/// Lifecycle of one dialog instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DialogState {
    Open,
    /// Files were handed to the sender and the staged set was discarded.
    Accepted,
    /// The user closed the dialog and the staged set was discarded.
    Cancelled,
}

/// Collects files for one send and hands them to the sender on accept.
pub struct SelectFilesDialog {
    discovery: Arc<dyn Discovery>,
    notifier: Box<dyn Notifier>,
    picker: Box<dyn FilePicker>,
    staging: FileStagingSet,
    state: DialogState,
}

impl SelectFilesDialog {
    pub fn new(
        options: StagingOptions,
        picker: Box<dyn FilePicker>,
        notifier: Box<dyn Notifier>,
        discovery: Arc<dyn Discovery>,
    ) -> Self {
        Self {
            discovery,
            notifier,
            picker,
            staging: FileStagingSet::with_options(options),
            state: DialogState::Open,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Returns the staged files as currently listed in the dialog.
    pub fn staging(&self) -> &FileStagingSet {
        &self.staging
    }

    /// Returns the rows of the staged-files list.
    pub fn display_names(&self) -> Vec<String> {
        self.staging.display_names()
    }

    /// Asks the picker for files and stages them at the top level.
    pub fn add_files(&mut self) {
        if !self.is_open() {
            return;
        }

        let files = self.picker.pick_files();
        if files.is_empty() {
            debug!("File selection cancelled");

            return;
        }

        let failures = self.staging.add_all(files, "");
        self.report_failures(&failures);
    }

    /// Asks the picker for a folder and stages every regular file below it.
    pub fn add_folder(&mut self) {
        if !self.is_open() {
            return;
        }

        let Some(folder) = self.picker.pick_folder() else {
            debug!("Folder selection cancelled");

            return;
        };

        let failures = self.staging.add_directory(&folder);
        self.report_failures(&failures);
    }

    /// Returns whether a drag carrying `urls` may be dropped on the dialog.
    pub fn accepts_drag(&self, urls: &[Url]) -> bool {
        self.is_open() && !urls.is_empty()
    }

    /// Stages every local file among the dropped `urls` at the top level.
    ///
    /// URLs that do not name a local file are ignored.
    pub fn drop_urls(&mut self, urls: &[Url]) {
        if !self.is_open() {
            return;
        }

        let paths: Vec<_> = urls
            .iter()
            .filter_map(|url| {
                let path = local_file_path(url);
                if path.is_none() {
                    debug!(%url, "Ignoring non-local drop");
                }

                path
            })
            .collect();

        let failures = self.staging.add_all(paths, "");
        self.report_failures(&failures);
    }

    /// Removes the selected rows of the staged-files list.
    pub fn remove_selected<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        if !self.is_open() {
            return;
        }

        self.staging.remove(indices);
    }

    /// Hands the staged files to `launcher` and closes the dialog.
    ///
    /// With nothing staged, or when the sender fails to start, the user is
    /// told why and the dialog stays open.
    pub fn accept(&mut self, launcher: &mut dyn SendLauncher) -> DialogState {
        if !self.is_open() {
            return self.state;
        }

        let snapshot = match self.staging.snapshot() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                self.notifier.warning(&error.to_string());

                return self.state;
            }
        };

        let file_count = snapshot.len();
        if let Err(error) = launcher.launch(snapshot, Arc::clone(&self.discovery)) {
            self.notifier.critical(&error);

            return self.state;
        }

        info!(files = file_count, "Send started");
        self.close(DialogState::Accepted);

        self.state
    }

    /// Discards the staged files and closes the dialog.
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!(files = self.staging.len(), "Selection cancelled");
            self.close(DialogState::Cancelled);
        }
    }

    fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    fn close(&mut self, state: DialogState) {
        self.staging.clear();
        self.state = state;
    }

    fn report_failures(&self, failures: &[StagingError]) {
        for failure in failures {
            self.notifier.critical(&failure.to_string());
        }
    }
}

/// Resolves a `file://` URL to a local path.
fn local_file_path(url: &Url) -> Option<std::path::PathBuf> {
    if url.scheme() != "file" {
        return None;
    }

    url.to_file_path().ok()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use mockall::predicate::eq;
    use tempfile::TempDir;

    use super::*;
    use crate::infra::notify::MockNotifier;
    use crate::infra::picker::MockFilePicker;
    use crate::infra::send::{MockSendLauncher, StaticDiscovery};

    fn write_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test expectation should hold");
        }
        fs::write(&path, name).expect("test expectation should hold");

        path
    }

    fn dialog_with(picker: MockFilePicker, notifier: MockNotifier) -> SelectFilesDialog {
        SelectFilesDialog::new(
            StagingOptions::default(),
            Box::new(picker),
            Box::new(notifier),
            Arc::new(StaticDiscovery::new(vec!["desk".to_string()])),
        )
    }

    fn file_url(path: &Path) -> Url {
        Url::from_file_path(path).expect("test expectation should hold")
    }

    #[test]
    fn test_add_files_stages_picked_files_and_reports_failures() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let present = write_file(temp_dir.path(), "a.txt");
        let missing = temp_dir.path().join("missing.txt");
        let picked = vec![present, missing];
        let mut picker = MockFilePicker::new();
        picker
            .expect_pick_files()
            .times(1)
            .returning(move || picked.clone());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_critical()
            .withf(|message| message.starts_with("Unable to open file"))
            .times(1)
            .return_const(());
        let mut dialog = dialog_with(picker, notifier);

        // Act
        dialog.add_files();

        // Assert
        assert_eq!(dialog.display_names(), vec!["a.txt"]);
    }

    #[test]
    fn test_add_files_cancelled_stages_nothing() {
        // Arrange
        let mut picker = MockFilePicker::new();
        picker.expect_pick_files().times(1).returning(Vec::new);
        let mut dialog = dialog_with(picker, MockNotifier::new());

        // Act
        dialog.add_files();

        // Assert
        assert!(dialog.staging().is_empty());
    }

    #[test]
    fn test_add_folder_stages_tree_under_folder_name() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        write_file(temp_dir.path(), "X/sub/b.txt");
        let folder = temp_dir.path().join("X");
        let mut picker = MockFilePicker::new();
        picker
            .expect_pick_folder()
            .times(1)
            .returning(move || Some(folder.clone()));
        let mut dialog = dialog_with(picker, MockNotifier::new());

        // Act
        dialog.add_folder();

        // Assert
        assert_eq!(dialog.display_names(), vec!["X/sub/b.txt"]);
    }

    #[test]
    fn test_add_folder_cancelled_stages_nothing() {
        // Arrange
        let mut picker = MockFilePicker::new();
        picker.expect_pick_folder().times(1).returning(|| None);
        let mut dialog = dialog_with(picker, MockNotifier::new());

        // Act
        dialog.add_folder();

        // Assert
        assert!(dialog.staging().is_empty());
    }

    #[test]
    fn test_drop_urls_ignores_non_local_urls() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let path = write_file(temp_dir.path(), "dropped.txt");
        let remote = Url::parse("https://example.com/file.txt").expect("test expectation should hold");
        let urls = vec![file_url(&path), remote];
        let mut dialog = dialog_with(MockFilePicker::new(), MockNotifier::new());

        // Act
        let accepts = dialog.accepts_drag(&urls);
        dialog.drop_urls(&urls);

        // Assert
        assert!(accepts);
        assert_eq!(dialog.display_names(), vec!["dropped.txt"]);
    }

    #[test]
    fn test_drop_directory_reports_not_regular_file() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let mut notifier = MockNotifier::new();
        notifier
            .expect_critical()
            .withf(|message| message.ends_with("is not a regular file. Skipping."))
            .times(1)
            .return_const(());
        let mut dialog = dialog_with(MockFilePicker::new(), notifier);

        // Act
        dialog.drop_urls(&[file_url(temp_dir.path())]);

        // Assert
        assert!(dialog.staging().is_empty());
    }

    #[test]
    fn test_accepts_drag_requires_urls() {
        // Arrange
        let dialog = dialog_with(MockFilePicker::new(), MockNotifier::new());

        // Act
        let accepts = dialog.accepts_drag(&[]);

        // Assert
        assert!(!accepts);
    }

    #[test]
    fn test_remove_selected_removes_rows_by_identity() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let urls: Vec<Url> = ["A", "B", "C"]
            .iter()
            .map(|name| file_url(&write_file(temp_dir.path(), name)))
            .collect();
        let mut dialog = dialog_with(MockFilePicker::new(), MockNotifier::new());
        dialog.drop_urls(&urls);

        // Act
        dialog.remove_selected([2, 0]);

        // Assert
        assert_eq!(dialog.display_names(), vec!["B"]);
    }

    #[test]
    fn test_accept_empty_warns_and_stays_open() {
        // Arrange
        let mut notifier = MockNotifier::new();
        notifier
            .expect_warning()
            .with(eq("No file to be sent."))
            .times(1)
            .return_const(());
        let mut launcher = MockSendLauncher::new();
        launcher.expect_launch().never();
        let mut dialog = dialog_with(MockFilePicker::new(), notifier);

        // Act
        let state = dialog.accept(&mut launcher);

        // Assert
        assert_eq!(state, DialogState::Open);
    }

    #[test]
    fn test_accept_hands_snapshot_and_discovery_to_launcher() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let path = write_file(temp_dir.path(), "a.txt");
        let mut launcher = MockSendLauncher::new();
        launcher
            .expect_launch()
            .withf(|snapshot, discovery| {
                snapshot.len() == 1 && discovery.destinations() == vec!["desk".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut dialog = dialog_with(MockFilePicker::new(), MockNotifier::new());
        dialog.drop_urls(&[file_url(&path)]);

        // Act
        let state = dialog.accept(&mut launcher);

        // Assert
        assert_eq!(state, DialogState::Accepted);
        assert!(dialog.staging().is_empty());
    }

    #[test]
    fn test_accept_launch_failure_reports_and_stays_open() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let path = write_file(temp_dir.path(), "a.txt");
        let mut launcher = MockSendLauncher::new();
        launcher
            .expect_launch()
            .times(1)
            .returning(|_, _| Err("no peers".to_string()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_critical()
            .with(eq("no peers"))
            .times(1)
            .return_const(());
        let mut dialog = dialog_with(MockFilePicker::new(), notifier);
        dialog.drop_urls(&[file_url(&path)]);

        // Act
        let state = dialog.accept(&mut launcher);

        // Assert
        assert_eq!(state, DialogState::Open);
        assert_eq!(dialog.staging().len(), 1);
    }

    #[test]
    fn test_cancel_discards_staged_files_and_ignores_later_input() {
        // Arrange
        let temp_dir = TempDir::new().expect("test expectation should hold");
        let first = write_file(temp_dir.path(), "a.txt");
        let second = write_file(temp_dir.path(), "b.txt");
        let mut dialog = dialog_with(MockFilePicker::new(), MockNotifier::new());
        dialog.drop_urls(&[file_url(&first)]);

        // Act
        dialog.cancel();
        dialog.drop_urls(&[file_url(&second)]);

        // Assert
        assert_eq!(dialog.state(), DialogState::Cancelled);
        assert!(dialog.staging().is_empty());
        assert!(!dialog.accepts_drag(&[file_url(&second)]));
    }
}
