//! Dedup engine: walk, hash, consult the index, then skip or materialize.

use crate::error::{Error, Result};
use crate::hasher::ContentHasher;
use crate::index::DuplicateIndex;
use crate::materialize::Materializer;
use crate::options::{Action, DedupOptions};
use crate::stats::RunStats;
use crate::utils::path::absolute_clean;
use crate::vfs::{Filesystem, OsFs};
use crate::walker::{FileEntry, Walker};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Copy one file per distinct content from `src` into `dst` on the local disk.
///
/// The surviving copy of each content is the first one met in traversal
/// order and keeps its path relative to `src`. Later byte-identical files
/// are counted as skipped and never touch `dst`.
///
/// # Errors
///
/// Fails on the first error of any stage; nothing after it is processed.
/// A destination equal to or below the source is rejected before anything
/// is read or written. See [`Error`] for the stages.
///
/// # Example
///
/// ```no_run
/// use dedupcopy::{dedup, DedupOptions};
/// use std::path::Path;
///
/// let stats = dedup(Path::new("photos"), Path::new("unique"), &DedupOptions::default())?;
/// println!("{} bytes copied, {} skipped", stats.copied_bytes, stats.skipped_bytes);
/// # Ok::<(), dedupcopy::Error>(())
/// ```
pub fn dedup(src: &Path, dst: &Path, options: &DedupOptions) -> Result<RunStats> {
    dedup_with(&OsFs, src, dst, options)
}

/// Same as [`dedup`], on any [`Filesystem`].
///
/// # Errors
///
/// See [`dedup`].
pub fn dedup_with<F: Filesystem + ?Sized>(
    fs: &F,
    src: &Path,
    dst: &Path,
    options: &DedupOptions,
) -> Result<RunStats> {
    let start = Instant::now();
    let src = resolve(src)?;
    let dst = resolve(dst)?;
    if dst.starts_with(&src) {
        return Err(Error::DestinationInsideSource { src, dst });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(src = %src.display(), dst = %dst.display(), "starting dedup run");

    let mut run = Run {
        fs,
        options,
        hasher: ContentHasher::new(),
        index: DuplicateIndex::new(),
        materializer: Materializer::new(fs, &dst, options),
        stats: RunStats::default(),
    };
    for entry in Walker::new(fs, &src, options) {
        run.process(&entry?)?;
    }

    let mut stats = run.stats;
    stats.duration = start.elapsed();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        copied_bytes = stats.copied_bytes,
        skipped_bytes = stats.skipped_bytes,
        distinct = run.index.len(),
        "dedup run finished"
    );

    Ok(stats)
}

fn resolve(path: &Path) -> Result<PathBuf> {
    absolute_clean(path).map_err(|source| Error::InvalidPath {
        path: path.to_path_buf(),
        source,
    })
}

/// State owned by one run. Nothing here outlives it.
struct Run<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    options: &'a DedupOptions,
    hasher: ContentHasher,
    index: DuplicateIndex,
    materializer: Materializer<'a, F>,
    stats: RunStats,
}

impl<F: Filesystem + ?Sized> Run<'_, F> {
    fn process(&mut self, entry: &FileEntry) -> Result<()> {
        let mut src = self.fs.open(&entry.path).map_err(|source| Error::Open {
            path: entry.path.clone(),
            source,
        })?;

        let digest = self
            .hasher
            .digest_reader(&mut src)
            .map_err(|source| Error::Read {
                path: entry.path.clone(),
                source,
            })?;

        if let Some(_first) = self.index.lookup(&digest) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                path = %entry.relative_path.display(),
                first = %_first.display(),
                "duplicate content"
            );
            self.options.report(&entry.relative_path, Action::Skip);
            self.stats.record_skipped(entry.size);
            return Ok(());
        }
        self.index.record(digest, entry.relative_path.clone());

        src.seek(SeekFrom::Start(0)).map_err(|source| Error::Seek {
            path: entry.path.clone(),
            source,
        })?;

        self.options.report(&entry.relative_path, Action::Copy);
        let materializer = &self.materializer;
        let _written =
            materializer.materialize(&entry.relative_path, &mut src, self.stats.copied_bytes)?;

        #[cfg(feature = "tracing")]
        if _written != entry.size {
            tracing::debug!(
                path = %entry.relative_path.display(),
                expected = entry.size,
                written = _written,
                "file size changed during run"
            );
        }

        self.stats.record_copied(entry.size);
        Ok(())
    }
}
