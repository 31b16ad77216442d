//! Absolute, lexically normalized paths used as staging identities.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute and resolves `.` and `..` components lexically.
///
/// Symbolic links are not resolved. `..` at the filesystem root stays at the
/// root, so the result never ends in a `..` component.
///
/// # Errors
/// Returns an error when `path` is empty or the current directory cannot be
/// read.
pub fn normalize_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    Ok(normalized)
}
