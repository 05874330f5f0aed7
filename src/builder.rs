//! Builder API for ergonomic dedup runs.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a run. This is often more convenient than manually constructing
//! [`DedupOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use dedupcopy::DedupBuilder;
//!
//! let stats = DedupBuilder::new("photos", "unique").run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), dedupcopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use dedupcopy::DedupBuilder;
//!
//! let stats = DedupBuilder::new("photos", "unique")
//!     .ignore(".picasa.ini")
//!     .on_file(|path, action| println!("{}: {action}", path.display()))
//!     .run()?;
//! # Ok::<(), dedupcopy::Error>(())
//! ```

use crate::engine::{dedup, dedup_with};
use crate::error::Result;
use crate::options::{Action, DedupOptions};
use crate::stats::RunStats;
use crate::vfs::Filesystem;
use std::path::{Path, PathBuf};

/// A builder for configuring and executing dedup runs.
///
/// # Example
///
/// ```no_run
/// use dedupcopy::DedupBuilder;
///
/// let stats = DedupBuilder::new("/data/camera", "/backup/camera")
///     .on_warning(|msg| eprintln!("warning: {msg}"))
///     .run()?;
/// # Ok::<(), dedupcopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DedupBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: DedupOptions,
}

impl DedupBuilder {
    /// Create a new `DedupBuilder` with the given source and destination roots.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: DedupOptions::default(),
        }
    }

    /// Also ignore files named exactly `name`.
    ///
    /// The OS sidecar files in
    /// [`DEFAULT_IGNORED_NAMES`](crate::DEFAULT_IGNORED_NAMES) and
    /// [`DEFAULT_IGNORED_SUFFIXES`](crate::DEFAULT_IGNORED_SUFFIXES) are always
    /// ignored.
    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_ignored_name(name);
        self
    }

    /// Call `handler` with every eligible file and its [`Action`].
    #[must_use]
    pub fn on_file(mut self, handler: fn(&Path, Action)) -> Self {
        self.options = self.options.with_report_handler(handler);
        self
    }

    /// Route non-fatal warnings to `handler`.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: DedupOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the current options.
    #[must_use]
    pub fn get_options(&self) -> &DedupOptions {
        &self.options
    }

    /// Run on the local filesystem.
    ///
    /// # Errors
    ///
    /// See [`dedup`](crate::dedup).
    pub fn run(self) -> Result<RunStats> {
        dedup(&self.src, &self.dst, &self.options)
    }

    /// Run on the given filesystem.
    ///
    /// # Errors
    ///
    /// See [`dedup`](crate::dedup).
    pub fn run_with<F: Filesystem + ?Sized>(self, fs: &F) -> Result<RunStats> {
        dedup_with(fs, &self.src, &self.dst, &self.options)
    }
}
