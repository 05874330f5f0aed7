//! Path utilities for resolving run roots.
//!
//! Both roots are turned into clean absolute paths before any traversal, so
//! a run behaves the same whatever the working directory is.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and remove `.` and `..` components lexically.
///
/// Symlinks are not resolved and the path does not need to exist. `..` at
/// the filesystem root stays at the root.
///
/// # Errors
///
/// Fails if `path` is empty or the current directory cannot be determined.
pub fn absolute_clean(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut clean = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if clean.parent().is_some() {
                    clean.pop();
                }
            }
            other => clean.push(other.as_os_str()),
        }
    }
    Ok(clean)
}
