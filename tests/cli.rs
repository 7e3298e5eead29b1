extern crate assert_cmd;
extern crate mandelraster;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use predicates::prelude::*;

fn mandelraster() -> Command {
    Command::cargo_bin("mandelraster").unwrap()
}

#[test]
fn writes_bitmap_without_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("small");
    mandelraster()
        .args(&["-s", "40x30", "-c", "-0.5,0", "-m", "0.5", "-i", "50", "-t", "2", "-f", "none", "-o"])
        .arg(&stem)
        .assert()
        .success();

    let pixels = mandelraster::bmp::read(dir.path().join("small.bmp")).unwrap();
    assert_eq!((pixels.columns(), pixels.rows()), (40, 30));
    assert!(!dir.path().join("small.jpg").exists());
}

#[test]
fn converts_to_png_with_the_builtin_transcoder() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("view.v2");
    mandelraster()
        .args(&["-s", "16x16", "-i", "30", "-f", "png", "-o"])
        .arg(&stem)
        .assert()
        .success();

    assert!(dir.path().join("view.v2.bmp").exists());
    assert!(dir.path().join("view.v2.png").exists());
}

#[test]
fn failed_conversion_keeps_the_bitmap_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("img");
    mandelraster()
        .args(&["-s", "8x8", "-i", "20", "-x", "mandelraster-no-such-converter", "-o"])
        .arg(&stem)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("but conversion to"))
        .stderr(predicate::str::contains("img.jpg failed"));

    assert!(dir.path().join("img.bmp").exists());
}

#[test]
fn zero_magnification_is_rejected() {
    mandelraster()
        .args(&["-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Magnification must be greater than zero"));
}

#[test]
fn empty_image_is_a_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    mandelraster()
        .args(&["-s", "0x10", "-f", "none", "-o"])
        .arg(dir.path().join("img"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("has no pixels"));

    assert!(!dir.path().join("img.bmp").exists());
}

#[test]
fn unwritable_output_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    mandelraster()
        .args(&["-s", "4x4", "-i", "10", "-f", "none", "-o"])
        .arg(dir.path().join("missing").join("img"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not write bitmap"))
        .stderr(predicate::str::contains("i/o error"))
        .stderr(predicate::str::contains("Render failure").not());
}
