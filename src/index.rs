//! First-seen-wins duplicate index.

use crate::hasher::ContentDigest;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// Maps each content digest to the relative path that first produced it.
///
/// Built fresh for every run and owned by it. Entries are never removed or
/// replaced, so memory grows with the number of distinct contents seen.
#[derive(Debug, Default, Clone)]
pub struct DuplicateIndex {
    first_seen: HashMap<ContentDigest, PathBuf>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative path of the first file with this digest, if any.
    #[must_use]
    pub fn lookup(&self, digest: &ContentDigest) -> Option<&Path> {
        self.first_seen.get(digest).map(PathBuf::as_path)
    }

    /// Remember `relative_path` as the owner of `digest`.
    ///
    /// Returns `false` and leaves the index untouched if the digest is
    /// already recorded.
    pub fn record(&mut self, digest: ContentDigest, relative_path: PathBuf) -> bool {
        match self.first_seen.entry(digest) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(relative_path);
                true
            }
        }
    }

    /// Number of distinct contents recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
