//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
///
/// The destination root is `out/` inside its own temp dir, so tests can
/// check that nothing is created when a run writes nothing.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Destination root passed to `--out`.
    pub fn out(&self) -> PathBuf {
        self.dst.path().join("out")
    }

    /// Write a file below the source root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.src.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directory");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    /// The fruit tree used throughout the tests.
    pub fn fruit_tree(&self) {
        self.write("dir1/apple.txt", "apple");
        self.write("dir1/banana.txt", "banana");
        self.write("dir2/apple.txt", "apple");
        self.write("dir2/carrot.txt", "carrot");
        self.write("dir2/empty.txt", "");
        self.write("dir2/.DS_Store", "ds store");
        self.write("dir2/._.DS_Store", "more ds store");
    }

    /// Every file below the destination root as `relative|contents`, sorted.
    pub fn dest_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.out(), &self.out(), &mut files);
        files.sort();
        files
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    if !dir.is_dir() {
        return;
    }
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let relative = path
                .strip_prefix(root)
                .expect("Entry outside root")
                .to_string_lossy()
                .replace('\\', "/");
            let contents = fs::read_to_string(&path).expect("Failed to read file");
            out.push(format!("{relative}|{contents}"));
        }
    }
}
