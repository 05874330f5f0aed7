//! Filesystem capability set consumed by the dedup engine.
//!
//! The engine never touches `std::fs` directly. It walks, opens, creates and
//! makes directories through the [`Filesystem`] trait, so the same pipeline
//! runs against the real disk ([`OsFs`]) or an in-memory tree
//! ([`MemoryFs`]).

mod memory;
mod os;

use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

pub use memory::{Fault, MemoryFs};
pub use os::OsFs;

/// One entry produced by [`Filesystem::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Absolute path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Size in bytes (0 for directories)
    pub len: u64,
}

/// Iterator returned by [`Filesystem::walk`].
pub type Walk<'a> = Box<dyn Iterator<Item = io::Result<WalkEntry>> + 'a>;

/// Readable, rewindable source handle.
pub trait SourceFile: Read + Seek {}

impl<T: Read + Seek> SourceFile for T {}

/// Writable destination handle.
pub trait DestFile: Write {
    /// Force written data to durable storage.
    fn sync_all(&mut self) -> io::Result<()>;

    /// Release the handle, reporting any error the release produces.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Operations the dedup pipeline needs from a filesystem.
pub trait Filesystem {
    /// Walk the tree under `root`, root first, depth-first, with entries of
    /// each directory sorted by file name.
    ///
    /// Errors are yielded in place of the entry that could not be read.
    fn walk(&self, root: &Path) -> Walk<'_>;

    /// Open a file for reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn SourceFile>>;

    /// Create (or truncate) a file for writing.
    fn create(&self, path: &Path) -> io::Result<Box<dyn DestFile>>;

    /// Create a directory and all its missing parents. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}
