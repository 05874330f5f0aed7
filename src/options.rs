//! Configuration options for dedup runs.
//!
//! This module provides [`DedupOptions`] and the [`Action`] reported for each
//! processed file.
//!
//! # Example
//!
//! ```
//! use dedupcopy::DedupOptions;
//!
//! let options = DedupOptions::default()
//!     .with_ignored_name(".localized")
//!     .with_ignored_suffix(".picasa.ini")
//!     .with_warn_handler(|msg| eprintln!("warning: {msg}"));
//! ```

use std::fmt;
use std::path::Path;

/// Sidecar metadata files written by operating systems, matched by exact
/// file name.
pub const DEFAULT_IGNORED_NAMES: &[&str] = &["Thumbs.db", "desktop.ini"];

/// Sidecar file name endings.
///
/// A file whose name ends with one of these is ignored, which also catches
/// AppleDouble companions such as `._.DS_Store`.
pub const DEFAULT_IGNORED_SUFFIXES: &[&str] = &[".DS_Store"];

/// What the engine decided for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// First occurrence of its content; materialized at the destination
    Copy,
    /// Content already seen; counted as skipped
    Skip,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copy => "copying",
            Self::Skip => "skip",
        })
    }
}

/// Options for dedup runs.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `ignored_names` | [`DEFAULT_IGNORED_NAMES`] | Exact file names to skip entirely |
/// | `ignored_suffixes` | [`DEFAULT_IGNORED_SUFFIXES`] | File name endings to skip entirely |
/// | `report_handler` | `None` | Per-file decision callback |
/// | `warn_handler` | `None` | Non-fatal warning callback |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DedupOptions {
    /// File names excluded from traversal and from all counts
    pub ignored_names: Vec<String>,

    /// File name endings excluded from traversal and from all counts
    pub ignored_suffixes: Vec<String>,

    /// Called with the relative path and decision for every eligible file,
    /// before the file is copied
    #[cfg_attr(feature = "serde", serde(skip))]
    pub report_handler: Option<fn(&Path, Action)>,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            ignored_names: owned(DEFAULT_IGNORED_NAMES),
            ignored_suffixes: owned(DEFAULT_IGNORED_SUFFIXES),
            report_handler: None,
            warn_handler: None,
        }
    }
}

impl DedupOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a per-file report handler
    #[must_use]
    pub fn with_report_handler(mut self, handler: fn(&Path, Action)) -> Self {
        self.report_handler = Some(handler);
        self
    }

    /// Ignore files named exactly `name`, in addition to the defaults
    #[must_use]
    pub fn with_ignored_name(mut self, name: impl Into<String>) -> Self {
        self.ignored_names.push(name.into());
        self
    }

    /// Ignore files whose name ends with `suffix`, in addition to the defaults
    #[must_use]
    pub fn with_ignored_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.ignored_suffixes.push(suffix.into());
        self
    }

    /// Whether a file with this name is excluded from the run
    #[must_use]
    pub fn is_ignored(&self, file_name: &str) -> bool {
        let ends_with = |suffix: &String| file_name.ends_with(suffix.as_str());
        self.ignored_names.iter().any(|name| name == file_name)
            || self.ignored_suffixes.iter().any(ends_with)
    }

    pub(crate) fn report(&self, relative_path: &Path, action: Action) {
        if let Some(handler) = self.report_handler {
            handler(relative_path, action);
        }
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
