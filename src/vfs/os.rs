//! Real-disk backend built on `walkdir` and `std::fs`.

use super::{DestFile, Filesystem, SourceFile, Walk, WalkEntry};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl Filesystem for OsFs {
    fn walk(&self, root: &Path) -> Walk<'_> {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| -> io::Result<WalkEntry> {
                let entry = entry?;
                let meta = entry.metadata()?;
                Ok(WalkEntry {
                    is_dir: meta.is_dir(),
                    len: if meta.is_dir() { 0 } else { meta.len() },
                    path: entry.into_path(),
                })
            });
        Box::new(walker)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn SourceFile>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn DestFile>> {
        Ok(Box::new(OsDestFile {
            file: File::create(path)?,
        }))
    }

    /// Missing directories are created with mode `0770` on Unix, before the
    /// umask is applied.
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o770);
        }
        builder.create(path)
    }
}

struct OsDestFile {
    file: File,
}

impl Write for OsDestFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl DestFile for OsDestFile {
    fn sync_all(&mut self) -> io::Result<()> {
        self.file.sync_all()
    }

    /// Dropping a `File` discards the result of close(2), so on Unix the
    /// descriptor is closed by hand.
    #[cfg(unix)]
    fn close(self: Box<Self>) -> io::Result<()> {
        use std::os::unix::io::IntoRawFd;

        let fd = self.file.into_raw_fd();
        // SAFETY: fd was just released by an owned File and is closed exactly once
        if unsafe { libc::close(fd) } == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[cfg(not(unix))]
    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self.file);
        Ok(())
    }
}
