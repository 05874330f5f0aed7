//! Writing first occurrences into the destination tree.
//!
//! Each file goes through four fatal stages (create directories, create the
//! file, stream the bytes, sync) followed by a close that only warns: once
//! the sync succeeded the data is durable, so a failed release of the handle
//! is reported and the run goes on.

use crate::error::{Error, Result, is_no_space_error};
use crate::options::DedupOptions;
use crate::vfs::{DestFile, Filesystem};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Recreates source-relative paths under a destination root.
pub struct Materializer<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
    options: &'a DedupOptions,
}

impl<'a, F: Filesystem + ?Sized> Materializer<'a, F> {
    /// Materialize files under `root`, which must already be absolute and clean.
    pub fn new(fs: &'a F, root: &'a Path, options: &'a DedupOptions) -> Self {
        Self { fs, root, options }
    }

    /// Destination path for a source-relative path.
    #[must_use]
    pub fn destination_of(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Durably write everything `src` yields to `root/relative_path`.
    ///
    /// `src` must be positioned at the start of the file. `bytes_so_far` is
    /// only used to enrich a [`Error::NoSpace`] report.
    ///
    /// # Errors
    ///
    /// - [`Error::CreateDir`] if the parent hierarchy cannot be created
    /// - [`Error::CreateFile`] if the file cannot be created
    /// - [`Error::Copy`] or [`Error::NoSpace`] if streaming fails
    /// - [`Error::Sync`] if the data cannot be flushed to storage
    pub fn materialize<R: Read + ?Sized>(
        &self,
        relative_path: &Path,
        src: &mut R,
        bytes_so_far: u64,
    ) -> Result<u64> {
        let dst_path = self.destination_of(relative_path);
        let dst_dir = dst_path.parent().unwrap_or(self.root);

        self.fs
            .create_dir_all(dst_dir)
            .map_err(|source| Error::CreateDir {
                path: dst_dir.to_path_buf(),
                source,
            })?;

        let mut dst = self
            .fs
            .create(&dst_path)
            .map_err(|source| Error::CreateFile {
                path: dst_path.clone(),
                source,
            })?;

        let written = write_durably(src, dst.as_mut(), &dst_path, bytes_so_far);

        // Released on every path, including after a failed copy or sync
        if let Err(e) = dst.close() {
            self.options.warn(&format!(
                "Failed to close file {}: {}",
                dst_path.display(),
                e
            ));
        }

        written
    }
}

fn write_durably<R: Read + ?Sized>(
    src: &mut R,
    dst: &mut dyn DestFile,
    dst_path: &Path,
    bytes_so_far: u64,
) -> Result<u64> {
    let written = io::copy(src, dst).map_err(|source| {
        if is_no_space_error(&source) {
            Error::NoSpace {
                path: dst_path.to_path_buf(),
                bytes_copied: bytes_so_far,
                source,
            }
        } else {
            Error::Copy {
                path: dst_path.to_path_buf(),
                source,
            }
        }
    })?;

    dst.sync_all().map_err(|source| Error::Sync {
        path: dst_path.to_path_buf(),
        source,
    })?;

    Ok(written)
}
