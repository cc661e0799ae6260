// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Converting orchestrator-internal diagnostics to LSP `Diagnostic`s and
//! grouping them per file (§4.5 "Diagnostic routing").

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use artic_compiler_frontend::{CompileDiagnostic, Severity as CompileSeverity};
use artic_project_config::{ConfigDiagnostic, Severity as ConfigSeverity};
use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::coords::{byte_span_to_range, point_range};

fn diagnostic(range: Range, severity: DiagnosticSeverity, message: String) -> Diagnostic {
    Diagnostic {
        range,
        severity: Some(severity),
        source: Some("artic".to_string()),
        message,
        ..Diagnostic::default()
    }
}

/// Converts one file's compile diagnostics to LSP, preserving order.
pub fn compile_diagnostics_to_lsp(diagnostics: &[CompileDiagnostic]) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .map(|d| {
            let severity = match d.severity {
                CompileSeverity::Error => DiagnosticSeverity::ERROR,
                CompileSeverity::Warning => DiagnosticSeverity::WARNING,
            };
            diagnostic(point_range(d.location), severity, d.message.clone())
        })
        .collect()
}

/// Expands the workspace's accumulated configuration diagnostics into
/// per-file LSP diagnostic lists, re-scanning each referenced document's
/// text for literal occurrences (§4.5, §4.2.1, §8 property 8).
///
/// A diagnostic with no literal context, or whose literal can't be found
/// in the document, falls back to a document-start (0:0) range.
pub fn config_diagnostics_to_lsp(diagnostics: &[ConfigDiagnostic]) -> HashMap<PathBuf, Vec<Diagnostic>> {
    let mut by_file: HashMap<&Path, Vec<&ConfigDiagnostic>> = HashMap::new();
    for d in diagnostics {
        by_file.entry(d.file.as_path()).or_default().push(d);
    }

    let mut grouped = HashMap::with_capacity(by_file.len());
    for (file, file_diagnostics) in by_file {
        let text = std::fs::read_to_string(file).unwrap_or_default();
        let mut out = Vec::new();
        for d in file_diagnostics {
            let severity = match d.severity {
                ConfigSeverity::Error => DiagnosticSeverity::ERROR,
                ConfigSeverity::Warning => DiagnosticSeverity::WARNING,
                ConfigSeverity::Info => DiagnosticSeverity::INFORMATION,
                ConfigSeverity::Hint => DiagnosticSeverity::HINT,
            };
            let document_start = Range {
                start: Position::new(0, 0),
                end: Position::new(0, 0),
            };
            match &d.literal_context {
                Some(literal) => {
                    let spans = artic_project_config::find_literal_occurrences(&text, literal);
                    if spans.is_empty() {
                        out.push(diagnostic(document_start, severity, d.message.clone()));
                    } else {
                        for span in spans {
                            let range = byte_span_to_range(&text, span.start, span.end);
                            out.push(diagnostic(range, severity, d.message.clone()));
                        }
                    }
                }
                None => out.push(diagnostic(document_start, severity, d.message.clone())),
            }
        }
        grouped.insert(file.to_path_buf(), out);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_context_expands_to_its_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("artic.json");
        std::fs::write(&config_path, r#"{"projects": [{"name": "dup"}, {"name": "dup"}]}"#).unwrap();

        let diagnostics = vec![
            ConfigDiagnostic::error("duplicate project name `dup`", config_path.clone())
                .with_literal("dup".to_string()),
        ];
        let grouped = config_diagnostics_to_lsp(&diagnostics);
        let lsp_diagnostics = &grouped[&config_path];
        assert_eq!(lsp_diagnostics.len(), 2);
    }

    #[test]
    fn missing_literal_falls_back_to_document_start() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("artic.json");
        std::fs::write(&config_path, r#"{"projects": []}"#).unwrap();

        let diagnostics = vec![
            ConfigDiagnostic::error("unresolved dependency `missing`", config_path.clone())
                .with_literal("missing".to_string()),
        ];
        let grouped = config_diagnostics_to_lsp(&diagnostics);
        let lsp_diagnostics = &grouped[&config_path];
        assert_eq!(lsp_diagnostics.len(), 1);
        assert_eq!(lsp_diagnostics[0].range.start, Position::new(0, 0));
    }

    #[test]
    fn every_compile_diagnostic_keeps_its_severity() {
        let diagnostics = vec![CompileDiagnostic {
            severity: CompileSeverity::Warning,
            message: "unused binding".to_string(),
            location: artic_compiler_frontend::Location::new(2, 3),
        }];
        let lsp_diagnostics = compile_diagnostics_to_lsp(&diagnostics);
        assert_eq!(lsp_diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    }
}
