// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the compile orchestrator's trigger matrix (§4.5)
//! and diagnostic publication coverage (§8 property 5).

use std::fs;

use artic_compiler_frontend::ReferenceFrontend;
use artic_lsp::{Orchestrator, RequestKind};

fn orchestrator() -> Orchestrator<ReferenceFrontend> {
    Orchestrator::new(ReferenceFrontend::new())
}

#[test]
fn opening_a_file_with_no_prior_result_rebuilds() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    let report = orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    assert!(report.is_some());
    let report = report.unwrap();
    assert_eq!(report.compile_set.len(), 1);
    assert!(orchestrator.current().unwrap().covers(&artic_glob::weak_canonicalize(&file)));
}

#[test]
fn reopening_a_covered_file_does_not_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    let second = orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    assert!(second.is_none(), "a result that already covers the file must be reused, not rebuilt");
}

#[test]
fn changing_a_file_always_rebuilds_even_when_covered() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    let report = orchestrator.on_source_changed(&file, "fn main() {\n  let x = 1\n}".to_string());
    assert!(orchestrator.current().unwrap().symbols.lookup("x").len() == 1);
    assert_eq!(report.compile_set.len(), 1);
}

#[test]
fn saving_a_config_file_not_currently_tracked_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("artic.json");
    fs::write(&config, r#"{"artic-config": "2.0", "projects": []}"#).unwrap();

    let mut orchestrator = orchestrator();
    assert!(!orchestrator.on_config_saved(&config));
}

#[test]
fn saving_a_tracked_config_file_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("artic.json");
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();
    fs::write(&config, r#"{"artic-config": "2.0", "projects": [{"name": "main", "files": ["a.art"]}]}"#).unwrap();

    let mut orchestrator = orchestrator();
    orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    assert!(orchestrator.current().is_some());

    assert!(orchestrator.on_config_saved(&config));
    assert!(orchestrator.current().is_none(), "a reload must invalidate the cached result");
}

#[test]
fn semantic_tokens_never_trigger_a_compile() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    let result = orchestrator.ensure_compiled(&file, RequestKind::SemanticTokens);
    assert!(result.is_none(), "no current result and a no-compile request kind must not build one");
    assert!(orchestrator.current().is_none());
}

#[test]
fn definition_requests_build_when_uncovered() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    let result = orchestrator.ensure_compiled(&file, RequestKind::Definition);
    assert!(result.is_some());
}

#[test]
fn safe_mode_clears_after_a_fully_parsing_build() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.art");
    fs::write(&file, "fn main() {}").unwrap();

    let mut orchestrator = orchestrator();
    orchestrator.enable_safe_mode();
    assert!(orchestrator.safe_mode());
    orchestrator.on_source_opened(&file, "fn main() {}".to_string());
    assert!(!orchestrator.safe_mode());
}

#[test]
fn every_file_in_the_compile_set_gets_a_diagnostics_entry() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.art");
    let b = dir.path().join("b.art");
    fs::write(&a, "fn a() {}").unwrap();
    fs::write(&b, "fn b() {}").unwrap();
    fs::write(
        dir.path().join("artic.json"),
        r#"{"artic-config": "2.0", "projects": [{"name": "main", "files": ["*.art"]}]}"#,
    )
    .unwrap();

    let mut orchestrator = orchestrator();
    let report = orchestrator.on_source_opened(&a, "fn a() {}".to_string()).unwrap();
    assert_eq!(report.compile_set.len(), 2);
    for file in &report.compile_set {
        assert!(report.diagnostics.contains_key(file));
    }
}
