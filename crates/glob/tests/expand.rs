// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::fs;

use artic_glob::{expand, Severity};

fn names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn literal_pattern_matches_single_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::write(dir.path().join("main.art"), "").expect("write file");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "main.art", &mut diagnostics);

    assert_eq!(names(&matches), vec!["main.art"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn wildcard_segment_matches_by_fnmatch() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::write(dir.path().join("a.art"), "").expect("write a");
    fs::write(dir.path().join("b.art"), "").expect("write b");
    fs::write(dir.path().join("c.impala"), "").expect("write c");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "*.art", &mut diagnostics);

    let mut found = names(&matches);
    found.sort();
    assert_eq!(found, vec!["a.art", "b.art"]);
}

#[test]
fn double_star_recurses_into_subdirectories() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::create_dir_all(dir.path().join("sub/deeper")).expect("mkdir");
    fs::write(dir.path().join("top.art"), "").expect("write top");
    fs::write(dir.path().join("sub/mid.art"), "").expect("write mid");
    fs::write(dir.path().join("sub/deeper/bottom.art"), "").expect("write bottom");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "**/*.art", &mut diagnostics);

    let mut found = names(&matches);
    found.sort();
    assert_eq!(found, vec!["bottom.art", "mid.art", "top.art"]);
}

#[test]
fn nonexistent_root_is_an_error_with_empty_result() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let missing = dir.path().join("does-not-exist");

    let mut diagnostics = Vec::new();
    let matches = expand(&missing, "*.art", &mut diagnostics);

    assert!(matches.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn nonexistent_literal_last_segment_is_empty_without_diagnostic() {
    let dir = tempfile::tempdir().expect("create tempdir");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "missing.art", &mut diagnostics);

    assert!(matches.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn absolute_pattern_ignores_project_root() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let unrelated = tempfile::tempdir().expect("create unrelated tempdir");
    fs::write(unrelated.path().join("file.art"), "").expect("write file");

    let pattern = format!("{}/file.art", unrelated.path().display());
    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), &pattern, &mut diagnostics);

    assert_eq!(names(&matches), vec!["file.art"]);
}

#[test]
fn directories_are_never_accepted_as_matches() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::create_dir_all(dir.path().join("pkg.art")).expect("mkdir named like a file");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "pkg.art", &mut diagnostics);

    assert!(matches.is_empty());
}

#[test]
fn results_are_deduplicated_and_first_seen_ordered() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::create_dir_all(dir.path().join("a")).expect("mkdir a");
    fs::write(dir.path().join("a/one.art"), "").expect("write one");

    // two patterns reaching the same file via different literal routes
    // should not be an issue for a single expansion call; verify a single
    // pattern returns exactly one entry even when the path contains `.`.
    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "./a/one.art", &mut diagnostics);

    assert_eq!(matches.len(), 1);
}

#[test]
fn bare_trailing_double_star_collects_every_regular_file_under_root() {
    let dir = tempfile::tempdir().expect("create tempdir");
    fs::create_dir_all(dir.path().join("sub/deeper")).expect("mkdir");
    fs::write(dir.path().join("top.art"), "").expect("write top");
    fs::write(dir.path().join("sub/mid.impala"), "").expect("write mid");
    fs::write(dir.path().join("sub/deeper/bottom.art"), "").expect("write bottom");

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "**", &mut diagnostics);

    let mut found = names(&matches);
    found.sort();
    assert_eq!(found, vec!["bottom.art", "mid.impala", "top.art"]);
}

#[test]
fn wildcard_enumeration_is_capped() {
    let dir = tempfile::tempdir().expect("create tempdir");
    for i in 0..1100 {
        fs::write(dir.path().join(format!("f{i:04}.art")), "").expect("write file");
    }

    let mut diagnostics = Vec::new();
    let matches = expand(dir.path(), "*.art", &mut diagnostics);

    assert_eq!(matches.len(), 1000);
    assert!(diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("1000")));
}
