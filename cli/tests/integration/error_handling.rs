//! Error handling integration tests for the dedupcopy CLI.
//!
//! These tests verify:
//! - Missing or empty arguments print usage and exit 1
//! - A destination inside the source is refused before anything is written
//! - Runs that copy nothing are reported as failures
//! - IO failures surface a stage-identifying message and exit 1

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_missing_in_prints_usage() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("dedupcopy")
        .arg("--out")
        .arg(fx.out())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("--in"))
        .stderr(predicate::str::contains("Usage"));

    assert!(!fx.out().exists());
}

#[test]
fn test_missing_out_prints_usage() {
    let fx = TestFixture::new();
    fx.fruit_tree();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--out"));
}

#[test]
fn test_no_arguments_at_all() {
    cargo_bin_cmd!("dedupcopy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_in_without_value_prints_usage() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("dedupcopy")
        .arg("--out")
        .arg(fx.out())
        .arg("--in")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("--in"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_out_without_value_prints_usage() {
    let fx = TestFixture::new();
    fx.fruit_tree();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--out"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_empty_paths_count_as_missing() {
    let fx = TestFixture::new();
    fx.fruit_tree();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg("")
        .arg("--out")
        .arg(fx.out())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out=")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    assert!(!fx.out().exists());
}

#[test]
fn test_help_still_exits_zero() {
    cargo_bin_cmd!("dedupcopy")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--in"));
}

#[test]
fn test_destination_equal_to_source_is_refused() {
    let fx = TestFixture::new();
    fx.write("dir1/apple.txt", "apple");

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.src.path())
        .arg("-q")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error[destination_inside_source]"));

    let source = fs::read_to_string(fx.src.path().join("dir1/apple.txt")).unwrap();
    assert_eq!(source, "apple");
}

#[test]
fn test_destination_below_source_is_refused() {
    let fx = TestFixture::new();
    fx.write("dir1/apple.txt", "apple");
    let nested = fx.src.path().join("zz");

    for _ in 0..2 {
        cargo_bin_cmd!("dedupcopy")
            .arg("--in")
            .arg(fx.src.path())
            .arg("--out")
            .arg(&nested)
            .arg("-q")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error[destination_inside_source]"));
    }

    assert!(!nested.exists());
}

/// Only sidecar and empty files: the run succeeds but copies nothing.
#[test]
fn test_nothing_to_copy_is_a_failure() {
    let fx = TestFixture::new();
    fx.write(".DS_Store", "ds store");
    fx.write("sub/empty.txt", "");

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stdout("Nothing happened?\n")
        .stderr("");

    assert!(fx.dest_files().is_empty());
}

#[test]
fn test_empty_source_directory_is_nothing() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stdout("Nothing happened?\n");
}

#[test]
fn test_missing_source_directory() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path().join("does-not-exist"))
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error[source_not_found]"));

    assert!(!fx.out().exists());
}

#[test]
fn test_source_is_a_file() {
    let fx = TestFixture::new();
    fx.write("single.txt", "apple");

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path().join("single.txt"))
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_a_directory]"));
}

/// The destination root exists as a regular file, so no directory can be
/// created below it.
#[test]
fn test_destination_blocked_by_file() {
    let fx = TestFixture::new();
    fx.write("dir1/apple.txt", "apple");
    fs::write(fx.out(), "in the way").unwrap();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[create_dir_failed]"))
        .stderr(predicate::str::contains("Failed to create directory hierarchy"));

    assert_eq!(fs::read_to_string(fx.out()).unwrap(), "in the way");
}

/// A directory sits where a file must be written.
#[test]
fn test_destination_file_blocked_by_directory() {
    let fx = TestFixture::new();
    fx.write("apple.txt", "apple");
    fs::create_dir_all(fx.out().join("apple.txt")).unwrap();

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[create_file_failed]"));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_aborts_the_walk() {
    let fx = TestFixture::new();
    fx.write("a.txt", "apple");
    std::os::unix::fs::symlink(fx.src.path().join("gone"), fx.src.path().join("b-link"))
        .unwrap();
    fx.write("c.txt", "carrot");

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[traversal_failed]"));

    // Fail fast: the file sorted before the link was copied, the one after was not
    assert_eq!(fx.dest_files(), vec!["a.txt|apple"]);
}
