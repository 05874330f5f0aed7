//! Tree walker producing the files eligible for deduplication.

use crate::error::{Error, Result};
use crate::options::DedupOptions;
use crate::vfs::{Filesystem, Walk};
use std::io;
use std::path::{Path, PathBuf};

/// A regular, non-empty, non-ignorable file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute source path
    pub path: PathBuf,
    /// Path relative to the source root
    pub relative_path: PathBuf,
    /// Size in bytes as reported by the walk
    pub size: u64,
}

/// Lazy, single-pass sequence of [`FileEntry`] under a root.
///
/// The first error ends the sequence: it is yielded once and every later
/// call to `next` returns `None`. Build a new walker to enumerate again.
pub struct Walker<'a> {
    root: PathBuf,
    inner: Walk<'a>,
    options: &'a DedupOptions,
    started: bool,
    done: bool,
}

impl<'a> Walker<'a> {
    /// Start walking `root` on `fs`.
    pub fn new<F: Filesystem + ?Sized>(fs: &'a F, root: &Path, options: &'a DedupOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            inner: fs.walk(root),
            options,
            started: false,
            done: false,
        }
    }

    fn fail(&mut self, error: Error) -> Option<Result<FileEntry>> {
        self.done = true;
        Some(Err(error))
    }
}

impl Iterator for Walker<'_> {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some(next) = self.inner.next() else {
                self.done = true;
                return None;
            };
            let first = !self.started;
            self.started = true;

            let entry = match next {
                Ok(entry) => entry,
                Err(e) if first && e.kind() == io::ErrorKind::NotFound => {
                    return self.fail(Error::SourceNotFound(self.root.clone()));
                }
                Err(source) => return self.fail(Error::Traversal { source }),
            };

            if first && !entry.is_dir {
                return self.fail(Error::NotADirectory(self.root.clone()));
            }
            if entry.is_dir || entry.len == 0 {
                continue;
            }
            let ignored = entry
                .path
                .file_name()
                .is_some_and(|name| self.options.is_ignored(&name.to_string_lossy()));
            if ignored {
                continue;
            }

            let relative_path = match entry.path.strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => {
                    return self.fail(Error::Traversal {
                        source: io::Error::other(format!(
                            "{} is outside of {}",
                            entry.path.display(),
                            self.root.display()
                        )),
                    });
                }
            };

            return Some(Ok(FileEntry {
                path: entry.path,
                relative_path,
                size: entry.len,
            }));
        }
    }
}
