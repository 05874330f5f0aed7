//! Progress reporting support (requires `progress` feature)

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Create a ticking spinner for a dedup run over `src`.
///
/// indicatif hides the spinner automatically when stderr is not a terminal.
#[must_use]
pub fn create_spinner(src: &Path) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Deduplicating {}...", src.display()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
