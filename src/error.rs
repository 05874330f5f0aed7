//! Error types for dedupcopy.
//!
//! This module provides the [`Error`] enum containing every fatal condition
//! of a dedup run, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Setup | [`Error::InvalidPath`], [`Error::DestinationInsideSource`], [`Error::SourceNotFound`], [`Error::NotADirectory`] |
//! | Traversal | [`Error::Traversal`] |
//! | Source | [`Error::Open`], [`Error::Read`], [`Error::Seek`] |
//! | Destination | [`Error::CreateDir`], [`Error::CreateFile`] |
//! | Transfer | [`Error::Copy`], [`Error::NoSpace`], [`Error::Sync`] |
//!
//! A failure to close a destination handle is not an error: the data was
//! already synced, so it is reported through
//! [`DedupOptions::warn`](crate::DedupOptions) and the run continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dedupcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use dedupcopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that abort a dedup run.
///
/// Every variant names the stage that failed and the path it failed on.
/// Use [`std::error::Error::source`] to reach the underlying IO error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A root path could not be turned into a clean absolute path
    #[error("Cannot resolve {path} to an absolute path: {source}")]
    InvalidPath {
        /// Path as supplied by the caller
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination root is the source root or lies below it
    ///
    /// Writing there would truncate source files before they are read, or
    /// feed earlier output back into the walk.
    #[error("Destination {dst} is inside source {src}")]
    DestinationInsideSource {
        /// Resolved source root
        src: PathBuf,
        /// Resolved destination root
        dst: PathBuf,
    },

    /// Source root does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Source root is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The directory walk could not enumerate an entry
    #[error("Error during filesystem walk: {source}")]
    Traversal {
        /// Underlying error (carries the failing path when known)
        source: io::Error,
    },

    /// Source file could not be opened
    #[error("Failed to open source file {path}: {source}")]
    Open {
        /// Source file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source file could not be read while hashing
    #[error("Failed to read/hash file {path}: {source}")]
    Read {
        /// Source file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source file could not be rewound between hashing and copying
    #[error("Failed to seek source file {path}: {source}")]
    Seek {
        /// Source file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination directory hierarchy could not be created
    #[error("Failed to create directory hierarchy {path}: {source}")]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination file could not be created
    #[error("Failed to create output file {path}: {source}")]
    CreateFile {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Streaming bytes from source to destination failed
    #[error("Failed to copy file contents to {path}: {source}")]
    Copy {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// No space left on device while writing a destination file
    ///
    /// Files written before this one stay in place; re-running after
    /// freeing space starts the dedup over from scratch.
    #[error("No space left on device writing {path} ({bytes_copied} bytes copied before failure)")]
    NoSpace {
        /// Destination file being written
        path: PathBuf,
        /// Bytes already materialized by earlier files of this run
        bytes_copied: u64,
        /// Underlying error
        source: io::Error,
    },

    /// Destination file could not be synced to durable storage
    #[error("Failed to sync file contents of {path}: {source}")]
    Sync {
        /// Destination file
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// Stable, machine-readable code for this error.
    ///
    /// ```
    /// use std::path::PathBuf;
    ///
    /// let error = dedupcopy::Error::SourceNotFound(PathBuf::from("/missing"));
    /// assert_eq!(error.code(), "source_not_found");
    /// ```
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "invalid_path",
            Self::DestinationInsideSource { .. } => "destination_inside_source",
            Self::SourceNotFound(_) => "source_not_found",
            Self::NotADirectory(_) => "not_a_directory",
            Self::Traversal { .. } => "traversal_failed",
            Self::Open { .. } => "open_failed",
            Self::Read { .. } => "read_failed",
            Self::Seek { .. } => "seek_failed",
            Self::CreateDir { .. } => "create_dir_failed",
            Self::CreateFile { .. } => "create_file_failed",
            Self::Copy { .. } => "copy_failed",
            Self::NoSpace { .. } => "no_space",
            Self::Sync { .. } => "sync_failed",
        }
    }
}
