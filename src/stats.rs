//! Byte accounting for a dedup run.

use std::fmt;
use std::time::Duration;

/// Statistics from a dedup run.
///
/// Every eligible file adds its size to exactly one of `copied_bytes` and
/// `skipped_bytes`.
///
/// # Example
///
/// ```no_run
/// use dedupcopy::{Outcome, dedup, DedupOptions};
/// use std::path::Path;
///
/// let stats = dedup(Path::new("photos"), Path::new("unique"), &DedupOptions::default())?;
/// match stats.outcome() {
///     Outcome::Copied(summary) => println!("{summary}"),
///     Outcome::NothingCopied => println!("Nothing happened?"),
/// }
/// # Ok::<(), dedupcopy::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Bytes of first occurrences written to the destination
    pub copied_bytes: u64,
    /// Bytes of later occurrences left behind
    pub skipped_bytes: u64,
    /// Number of files written to the destination
    pub files_copied: u64,
    /// Number of duplicate files skipped
    pub files_skipped: u64,
    /// Duration of the run
    pub duration: Duration,
}

impl RunStats {
    pub(crate) fn record_copied(&mut self, size: u64) {
        self.copied_bytes += size;
        self.files_copied += 1;
    }

    pub(crate) fn record_skipped(&mut self, size: u64) {
        self.skipped_bytes += size;
        self.files_skipped += 1;
    }

    /// Sum of the sizes of all eligible files seen.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.copied_bytes + self.skipped_bytes
    }

    /// How the run ended: with a summary, or as a no-op.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.copied_bytes == 0 {
            Outcome::NothingCopied
        } else {
            Outcome::Copied(Summary {
                copied_bytes: self.copied_bytes,
                skipped_bytes: self.skipped_bytes,
            })
        }
    }
}

/// Terminal state of a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// At least one byte was materialized
    Copied(Summary),
    /// The run finished without copying anything
    NothingCopied,
}

/// Final report line of a run that copied something.
///
/// Renders as `Copied <n> MB, skipped <m> MB (<r>%)` where the sizes are the
/// byte counts divided by 1024 and `<r>` is the copied share of all bytes as
/// a ratio. The labels are kept exactly as the tool has always printed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Bytes copied
    pub copied_bytes: u64,
    /// Bytes skipped
    pub skipped_bytes: u64,
}

impl Summary {
    /// `copied / (copied + skipped)`.
    #[must_use]
    pub fn copied_ratio(&self) -> f64 {
        let total = self.copied_bytes + self.skipped_bytes;
        if total == 0 {
            return 0.0;
        }
        self.copied_bytes as f64 / total as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} MB, skipped {} MB ({:.2}%)",
            self.copied_bytes / 1024,
            self.skipped_bytes / 1024,
            self.copied_ratio()
        )
    }
}
