// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The concrete end-to-end scenarios of §8, exercised against real
//! temporary filesystems.

use std::fs;
use std::path::Path;

use artic_workspace::Workspace;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn single_file_no_config() {
    let dir = tempfile::tempdir().unwrap();
    let foo = dir.path().join("foo.art");
    write(&foo, "fn main() {}");

    let mut ws = Workspace::new();
    let set = ws.compile_set(&foo);

    assert_eq!(set, vec![artic_glob::weak_canonicalize(&foo)]);
    assert!(ws.diagnostics().is_empty());
}

#[test]
fn single_project_with_glob() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.art");
    let b = dir.path().join("sub/b.art");
    write(&a, "fn a() {}");
    write(&b, "fn b() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [{"name": "main", "files": ["**/*.art"]}]}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&a);

    let a = artic_glob::weak_canonicalize(&a);
    let b = artic_glob::weak_canonicalize(&b);
    assert!(set.contains(&a));
    assert!(set.contains(&b));
    assert_eq!(set.iter().filter(|p| **p == a).count(), 1);
}

#[test]
fn dependency_chain_pulls_in_every_transitive_file() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("app/main.art"), "fn main() {}");
    write(&dir.path().join("lib/lib.art"), "fn helper() {}");
    write(&dir.path().join("core/core.art"), "fn base() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [
            {"name": "app", "folder": "app", "files": ["*.art"], "dependencies": ["lib"]},
            {"name": "lib", "folder": "lib", "files": ["*.art"], "dependencies": ["core"]},
            {"name": "core", "folder": "core", "files": ["*.art"]}
        ]}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&dir.path().join("app/main.art"));

    assert_eq!(set.len(), 3);
    for name in ["app/main.art", "lib/lib.art", "core/core.art"] {
        assert!(set.contains(&artic_glob::weak_canonicalize(&dir.path().join(name))));
    }
}

#[test]
fn diamond_dependency_is_not_a_cycle() {
    // app -> lib, app -> util, lib -> core, util -> core: core is reached
    // twice through two non-overlapping branches, which must not be
    // mistaken for a cycle back onto util or lib.
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("app/main.art"), "fn main() {}");
    write(&dir.path().join("lib/lib.art"), "fn helper() {}");
    write(&dir.path().join("util/util.art"), "fn util() {}");
    write(&dir.path().join("core/core.art"), "fn base() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [
            {"name": "app", "folder": "app", "files": ["*.art"], "dependencies": ["lib", "util"]},
            {"name": "lib", "folder": "lib", "files": ["*.art"], "dependencies": ["core"]},
            {"name": "util", "folder": "util", "files": ["*.art"], "dependencies": ["core"]},
            {"name": "core", "folder": "core", "files": ["*.art"]}
        ]}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&dir.path().join("app/main.art"));

    assert_eq!(set.len(), 4);
    for name in ["app/main.art", "lib/lib.art", "util/util.art", "core/core.art"] {
        assert!(set.contains(&artic_glob::weak_canonicalize(&dir.path().join(name))));
    }
    assert!(
        ws.diagnostics().iter().all(|d| !d.message.contains("cyclic dependency")),
        "a diamond-shaped dependency graph must never be reported as cyclic"
    );
}

#[test]
fn cyclic_dependency_reports_once_and_terminates() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("x.art"), "fn x() {}");
    write(&dir.path().join("y.art"), "fn y() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [
            {"name": "x", "files": ["x.art"], "dependencies": ["y"]},
            {"name": "y", "files": ["y.art"], "dependencies": ["x"]}
        ]}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&dir.path().join("x.art"));

    assert!(set.contains(&artic_glob::weak_canonicalize(&dir.path().join("x.art"))));
    assert!(set.contains(&artic_glob::weak_canonicalize(&dir.path().join("y.art"))));
    let cycle_diags: Vec<_> = ws
        .diagnostics()
        .iter()
        .filter(|d| d.message.contains("cyclic dependency"))
        .collect();
    assert_eq!(cycle_diags.len(), 1);
}

#[test]
fn optional_missing_include_is_silently_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let foo = dir.path().join("foo.art");
    write(&foo, "fn foo() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "include": ["other.json?"]}"#,
    );

    let mut ws = Workspace::new();
    let _ = ws.compile_set(&foo);

    assert!(ws.diagnostics().is_empty());
}

#[test]
fn missing_required_include_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let foo = dir.path().join("foo.art");
    write(&foo, "fn foo() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "include": ["other.json"]}"#,
    );

    let mut ws = Workspace::new();
    let _ = ws.compile_set(&foo);

    assert!(!ws.diagnostics().is_empty());
}

#[test]
fn config_edit_triggers_reload_and_new_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.art");
    let b = dir.path().join("b.art");
    write(&a, "fn a() {}");
    write(&b, "fn b() {}");
    let config_path = dir.path().join("artic.json");
    write(
        &config_path,
        r#"{"artic-config": "2.0", "projects": [{"name": "main", "files": ["a.art"]}]}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&a);
    assert!(!set.contains(&artic_glob::weak_canonicalize(&b)));

    assert!(ws.config_change_requires_reload(&config_path));
    write(
        &config_path,
        r#"{"artic-config": "2.0", "projects": [{"name": "main", "files": ["a.art", "b.art"]}]}"#,
    );
    ws.reload();

    let set = ws.compile_set(&a);
    assert!(set.contains(&artic_glob::weak_canonicalize(&b)));
}

#[test]
fn default_project_used_when_no_declared_project_matches() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = dir.path().join("scratch.art");
    write(&scratch, "fn scratch() {}");
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [{"name": "only", "files": ["never_matches/*.art"]}], "default-project": "only"}"#,
    );

    let mut ws = Workspace::new();
    let set = ws.compile_set(&scratch);
    assert!(set.contains(&artic_glob::weak_canonicalize(&scratch)));
}

#[test]
fn dot_artic_lsp_takes_priority_over_artic_json() {
    let dir = tempfile::tempdir().unwrap();
    let foo = dir.path().join("foo.art");
    write(&foo, "fn foo() {}");
    write(
        &dir.path().join(".artic-lsp"),
        r#"{"artic-config": "2.0", "projects": [{"name": "preferred", "files": ["foo.art"]}]}"#,
    );
    write(
        &dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [{"name": "other", "files": ["foo.art"]}]}"#,
    );

    let mut ws = Workspace::new();
    let handle = ws.resolve_project_for_file(&foo).unwrap();
    assert_eq!(handle.as_str(), "preferred");
}
