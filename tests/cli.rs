extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use image::GenericImageView;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn histobrot() -> Command {
    Command::cargo_bin("histobrot").unwrap()
}

#[test]
fn renders_a_small_histogram_image() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.png");
    histobrot()
        .args(&["-w", "175", "-i", "200", "-t", "1", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Time to run:"));
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (175, 100));
    assert!(img.as_luma16().is_some());
}

#[test]
fn renders_linear_eight_bit_with_explicit_height() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("linear.png");
    histobrot()
        .args(&["--width", "64", "--height", "48", "--iterations", "100"])
        .args(&["--coloring", "linear", "--depth", "8", "--output"])
        .arg(&output)
        .assert()
        .success();
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (64, 48));
    let gray = img.as_luma8().unwrap();
    // The top-left corner escapes at once: white under linear shading.
    assert_eq!(gray.get_pixel(0, 0)[0], 255);
}

#[test]
fn rejects_unknown_coloring() {
    histobrot()
        .args(&["--coloring", "rainbow"])
        .assert()
        .failure();
}

#[test]
fn rejects_zero_threads() {
    histobrot()
        .args(&["--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between 1"));
}

#[test]
fn reports_uncreatable_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("out.png");
    histobrot()
        .args(&["-w", "35", "-i", "50", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
    assert!(!output.exists());
}

#[test]
fn rejects_widths_too_narrow_for_a_derived_height() {
    histobrot()
        .args(&["-w", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image width must be between 4"));
}

#[test]
fn narrowest_width_still_renders() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("narrow.png");
    histobrot()
        .args(&["-w", "4", "-i", "20", "-o"])
        .arg(&output)
        .assert()
        .success();
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (4, 2));
}

#[test]
fn timing_line_reports_fractional_seconds() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("timed.png");
    histobrot()
        .args(&["-w", "35", "-i", "50", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Time to run: \d+\.\d{6}\n").unwrap());
}
