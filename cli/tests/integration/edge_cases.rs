//! Edge case integration tests for the dedupcopy CLI.
//!
//! These tests cover:
//! - Ignored sidecar files and user-supplied ignore names
//! - Same names with different content, different names with same content
//! - Deep nesting, unicode names and larger files

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

fn run_quiet(fx: &TestFixture) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("-q")
        .assert()
}

#[rstest]
#[case(".DS_Store")]
#[case("._.DS_Store")]
#[case("Thumbs.db")]
#[case("desktop.ini")]
fn test_sidecar_files_are_ignored(#[case] name: &str) {
    let fx = TestFixture::new();
    fx.write("keep.txt", "keep");
    fx.write(&format!("sub/{name}"), "sidecar bytes");

    run_quiet(&fx)
        .success()
        .stdout("Copied 0 MB, skipped 0 MB (1.00%)\n");

    assert_eq!(fx.dest_files(), vec!["keep.txt|keep"]);
}

#[rstest]
#[case("old_desktop.ini")]
#[case("myThumbs.db")]
#[case("Thumbs.db.bak")]
fn test_names_resembling_sidecars_are_copied(#[case] name: &str) {
    let fx = TestFixture::new();
    fx.write("keep.txt", "keep");
    fx.write(&format!("sub/{name}"), "user data");

    run_quiet(&fx).success();

    let copied = format!("sub/{name}|user data");
    assert_eq!(fx.dest_files(), vec!["keep.txt|keep", copied.as_str()]);
}

#[test]
fn test_extra_ignore_names() {
    let fx = TestFixture::new();
    fx.write("keep.txt", "keep");
    fx.write("album/.picasa.ini", "picasa");
    fx.write("album/old.picasa.ini", "kept");

    cargo_bin_cmd!("dedupcopy")
        .arg("--in")
        .arg(fx.src.path())
        .arg("--out")
        .arg(fx.out())
        .arg("--ignore")
        .arg(".picasa.ini")
        .arg("-q")
        .assert()
        .success();

    assert_eq!(
        fx.dest_files(),
        vec!["album/old.picasa.ini|kept", "keep.txt|keep"]
    );
}

#[test]
fn test_same_name_different_content() {
    let fx = TestFixture::new();
    fx.write("a/notes.txt", "first notes");
    fx.write("b/notes.txt", "second notes");

    run_quiet(&fx).success();

    assert_eq!(
        fx.dest_files(),
        vec!["a/notes.txt|first notes", "b/notes.txt|second notes"]
    );
}

#[test]
fn test_different_names_same_content() {
    let fx = TestFixture::new();
    fx.write("x/IMG_0001.jpg", "pixels");
    fx.write("y/IMG_0001 (1).jpg", "pixels");
    fx.write("z/holiday.jpg", "pixels");

    run_quiet(&fx)
        .success()
        .stdout(predicate::str::contains("(0.33%)"));

    assert_eq!(fx.dest_files(), vec!["x/IMG_0001.jpg|pixels"]);
}

#[test]
fn test_lexicographically_first_copy_survives() {
    let fx = TestFixture::new();
    fx.write("b/copy.txt", "same");
    fx.write("a/z/original.txt", "same");

    run_quiet(&fx).success();

    assert_eq!(fx.dest_files(), vec!["a/z/original.txt|same"]);
}

#[test]
fn test_deep_nesting() {
    let fx = TestFixture::new();
    let deep = (0..20)
        .map(|i| format!("level{i}"))
        .collect::<Vec<_>>()
        .join("/");
    fx.write(&format!("{deep}/leaf.txt"), "leaf");

    run_quiet(&fx).success();

    assert_eq!(fx.dest_files(), vec![format!("{deep}/leaf.txt|leaf")]);
}

#[test]
fn test_unicode_names() {
    let fx = TestFixture::new();
    fx.write("фото/日本.txt", "unicode");
    fx.write("émoji/🍎.txt", "apple");

    run_quiet(&fx).success();

    assert_eq!(
        fx.dest_files(),
        vec!["émoji/🍎.txt|apple", "фото/日本.txt|unicode"]
    );
}

#[test]
fn test_larger_file_is_copied_intact() {
    let fx = TestFixture::new();
    let data: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    fs::create_dir_all(fx.src.path().join("bin")).unwrap();
    fs::write(fx.src.path().join("bin/data.bin"), &data).unwrap();
    fs::write(fx.src.path().join("bin/data-copy.bin"), &data).unwrap();

    run_quiet(&fx)
        .success()
        .stdout("Copied 3072 MB, skipped 3072 MB (0.50%)\n");

    assert_eq!(fs::read(fx.out().join("bin/data-copy.bin")).unwrap(), data);
    assert!(!fx.out().join("bin/data.bin").exists());
}

#[test]
fn test_rerun_into_same_destination() {
    let fx = TestFixture::new();
    fx.fruit_tree();

    run_quiet(&fx).success();
    run_quiet(&fx).success();

    assert_eq!(fx.dest_files().len(), 3);
}
