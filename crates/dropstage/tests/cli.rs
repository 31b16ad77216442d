use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("test expectation should hold");
    }
    fs::write(path, name).expect("test expectation should hold");
}

fn manifest(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("test expectation should hold")
}

fn display_names(manifest: &serde_json::Value) -> Vec<String> {
    let mut names: Vec<String> = manifest["files"]
        .as_array()
        .expect("test expectation should hold")
        .iter()
        .filter_map(|file| file["displayName"].as_str().map(ToString::to_string))
        .collect();
    names.sort();

    names
}

#[test]
fn test_folder_is_staged_under_its_own_name() {
    // Arrange
    let temp_dir = TempDir::new().expect("test expectation should hold");
    write_file(temp_dir.path(), "X/a.txt");
    write_file(temp_dir.path(), "X/sub/b.txt");

    // Act
    let output = Command::cargo_bin("dropstage")
        .expect("test expectation should hold")
        .arg("--folder")
        .arg(temp_dir.path().join("X"))
        .arg("--to")
        .arg("desk")
        .output()
        .expect("test expectation should hold");

    // Assert
    assert!(output.status.success());
    let manifest = manifest(&output.stdout);
    assert_eq!(manifest["destinations"][0], "desk");
    assert_eq!(display_names(&manifest), vec!["X/a.txt", "X/sub/b.txt"]);
}

#[test]
fn test_duplicate_and_removed_files_are_not_sent() {
    // Arrange
    let temp_dir = TempDir::new().expect("test expectation should hold");
    for name in ["A", "B", "C"] {
        write_file(temp_dir.path(), name);
    }

    // Act
    let output = Command::cargo_bin("dropstage")
        .expect("test expectation should hold")
        .arg(temp_dir.path().join("A"))
        .arg(temp_dir.path().join("B"))
        .arg(temp_dir.path().join("C"))
        .arg(temp_dir.path().join("A"))
        .args(["--remove", "0", "--remove", "2"])
        .output()
        .expect("test expectation should hold");

    // Assert
    assert!(output.status.success());
    assert_eq!(display_names(&manifest(&output.stdout)), vec!["B"]);
}

#[test]
fn test_nothing_staged_fails_with_warning() {
    // Arrange
    let temp_dir = TempDir::new().expect("test expectation should hold");

    // Act
    let output = Command::cargo_bin("dropstage")
        .expect("test expectation should hold")
        .arg(temp_dir.path().join("missing.txt"))
        .output()
        .expect("test expectation should hold");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to open file"));
    assert!(stderr.contains("No file to be sent."));
}
