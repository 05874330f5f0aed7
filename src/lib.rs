//! # dedupcopy
//!
//! Copy a directory tree keeping exactly one file per distinct content.
//!
//! ## Core Features
//!
//! - **Content addressed**: files are identified by the SHA-256 of their bytes, not by name
//! - **First seen wins**: the surviving copy keeps the relative path of its first occurrence
//! - **Deterministic**: entries are visited sorted by name, so the survivor is reproducible
//! - **Durable**: every written file is synced to storage before the next one starts
//! - **Fail fast**: the first error stops the run with a message naming the failing stage
//! - **Read only source**: nothing under the source root is modified; a destination inside it
//!   is refused
//! - **Pluggable filesystem**: run against the disk or an in-memory tree via [`vfs::Filesystem`]
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use dedupcopy::{DedupBuilder, Outcome};
//!
//! let stats = DedupBuilder::new("photos", "unique").run()?;
//! match stats.outcome() {
//!     Outcome::Copied(summary) => println!("{summary}"),
//!     Outcome::NothingCopied => println!("Nothing happened?"),
//! }
//! # Ok::<(), dedupcopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use dedupcopy::{dedup, DedupOptions};
//! use std::path::Path;
//!
//! let options = DedupOptions::default()
//!     .with_ignored_name(".picasa.ini")
//!     .with_report_handler(|path, action| println!("{:>50}: {action}", path.display()));
//!
//! let stats = dedup(Path::new("photos"), Path::new("unique"), &options)?;
//! println!("{} copied, {} skipped", stats.copied_bytes, stats.skipped_bytes);
//! # Ok::<(), dedupcopy::Error>(())
//! ```
//!
//! ## In-memory Runs
//!
//! ```
//! use dedupcopy::{dedup_with, DedupOptions, vfs::MemoryFs};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let src = std::path::absolute("/src")?;
//! let fs = MemoryFs::new();
//! fs.write_file(src.join("a/apple.txt"), "apple");
//! fs.write_file(src.join("b/apple.txt"), "apple");
//!
//! let stats = dedup_with(&fs, &src, Path::new("/dest"), &DedupOptions::default())?;
//! assert_eq!((stats.copied_bytes, stats.skipped_bytes), (5, 5));
//! # Ok(())
//! # }
//! ```
//!
//! ## Ignored Files
//!
//! Directories and empty files are never copied or counted, and neither are
//! the OS sidecar files named in [`DEFAULT_IGNORED_NAMES`] or ending in one of
//! [`DEFAULT_IGNORED_SUFFIXES`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Spinner support with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`DedupOptions`] and [`RunStats`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod engine;
mod error;
mod hasher;
mod index;
mod materialize;
mod options;
mod stats;
mod utils;
mod walker;

pub mod vfs;

#[cfg(feature = "progress")]
mod progress;

pub use builder::DedupBuilder;
pub use engine::{dedup, dedup_with};
pub use error::{Error, Result, is_no_space_error};
pub use hasher::{ContentDigest, ContentHasher};
pub use index::DuplicateIndex;
pub use materialize::Materializer;
pub use options::{Action, DEFAULT_IGNORED_NAMES, DEFAULT_IGNORED_SUFFIXES, DedupOptions};
pub use stats::{Outcome, RunStats, Summary};
pub use walker::{FileEntry, Walker};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_spinner;
