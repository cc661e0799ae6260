// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! A minimal, honestly-partial reference implementation of
//! [`CompileFrontend`] (§1 `[AMBIENT]`).
//!
//! This is not a claim about what a production `artic`/`impala` frontend
//! looks like — it exists so `artic-workspace` and `artic-lsp` are
//! testable end-to-end without a real grammar. It recognizes exactly two
//! declaration forms (`fn NAME` and `let NAME`), registers one symbol per
//! match, and reports a single syntax diagnostic per file when its braces
//! don't balance.

use crate::frontend::CompileFrontend;
use crate::types::{
    CompileDiagnostic, CompileOutcome, CompileRequest, CompileRequestFile, Location, Severity,
    Symbol, SymbolKind, SymbolMap,
};

#[derive(Debug, Default)]
pub struct ReferenceFrontend;

impl ReferenceFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl CompileFrontend for ReferenceFrontend {
    fn compile(&self, request: &CompileRequest) -> CompileOutcome {
        let mut outcome = CompileOutcome {
            symbols: SymbolMap::new(),
            ..CompileOutcome::default()
        };
        let mut parsed_all = true;

        for file in &request.files {
            let mut diagnostics = Vec::new();
            let (ok, symbols) = parse_file(file, &mut diagnostics);
            if !ok {
                parsed_all = false;
            }
            if ok || !request.safe_mode {
                for symbol in symbols {
                    outcome.symbols.insert(symbol);
                }
            } else {
                tracing::debug!(file = %file.path.display(), "safe mode: skipping file that failed to parse");
                outcome.skipped_files.push(file.path.clone());
            }
            outcome.diagnostics.insert(file.path.clone(), diagnostics);
        }

        outcome.parsed_all = parsed_all;
        outcome
    }
}

/// Parses one file's text, returning whether it parsed cleanly (braces
/// balance) and the symbols it declared.
fn parse_file(file: &CompileRequestFile, diagnostics: &mut Vec<CompileDiagnostic>) -> (bool, Vec<Symbol>) {
    let mut symbols = Vec::new();
    let mut balance: i64 = 0;
    let mut unmatched_close_line: Option<u32> = None;
    let mut total_lines = 0u32;

    for (offset, line) in file.text.lines().enumerate() {
        let line_no = (offset + 1) as u32;
        total_lines = line_no;

        for ch in line.chars() {
            match ch {
                '{' => balance += 1,
                '}' => {
                    balance -= 1;
                    if balance < 0 && unmatched_close_line.is_none() {
                        unmatched_close_line = Some(line_no);
                    }
                }
                _ => {}
            }
        }

        if let Some((kind, name, column)) = scan_declaration(line) {
            symbols.push(Symbol {
                name,
                file: file.path.clone(),
                location: Location::new(line_no, column),
                kind,
            });
        }
    }

    if let Some(line) = unmatched_close_line {
        diagnostics.push(CompileDiagnostic {
            severity: Severity::Error,
            message: "unmatched closing brace `}`".to_string(),
            location: Location::new(line, 1),
        });
        return (false, symbols);
    }

    if balance > 0 {
        diagnostics.push(CompileDiagnostic {
            severity: Severity::Error,
            message: format!("{balance} unclosed `{{`"),
            location: Location::new(total_lines.max(1), 1),
        });
        return (false, symbols);
    }

    (true, symbols)
}

/// Recognizes `fn NAME` and `let NAME` at the start of a (trimmed) line.
fn scan_declaration(line: &str) -> Option<(SymbolKind, String, u32)> {
    let trimmed = line.trim_start();
    let indent = (line.len() - trimmed.len()) as u32;

    let (kind, rest, keyword_len) = if let Some(rest) = trimmed.strip_prefix("fn ") {
        (SymbolKind::Function, rest, 3u32)
    } else if let Some(rest) = trimmed.strip_prefix("let ") {
        (SymbolKind::Binding, rest, 4u32)
    } else {
        return None;
    };

    let rest_trimmed = rest.trim_start();
    let leading_space = (rest.len() - rest_trimmed.len()) as u32;
    let name: String = rest_trimmed
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    let first = name.chars().next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }

    let column = indent + keyword_len + leading_space + 1;
    Some((kind, name, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(text: &str) -> CompileRequestFile {
        CompileRequestFile {
            path: PathBuf::from("/ws/a.art"),
            text: text.to_string(),
        }
    }

    fn request(files: Vec<CompileRequestFile>, safe_mode: bool) -> CompileRequest {
        let active_file = files[0].path.clone();
        CompileRequest {
            files,
            active_file,
            safe_mode,
        }
    }

    #[test]
    fn registers_function_and_binding_symbols() {
        let frontend = ReferenceFrontend::new();
        let outcome = frontend.compile(&request(vec![file("fn main() {\n  let x = 1\n}")], false));
        assert!(outcome.parsed_all);
        assert_eq!(outcome.symbols.lookup("main").len(), 1);
        assert_eq!(outcome.symbols.lookup("x").len(), 1);
        assert_eq!(outcome.symbols.lookup("main")[0].kind, SymbolKind::Function);
    }

    #[test]
    fn unmatched_opening_brace_is_a_diagnostic() {
        let frontend = ReferenceFrontend::new();
        let outcome = frontend.compile(&request(vec![file("fn main() {\n  let x = 1")], false));
        assert!(!outcome.parsed_all);
        let diags = &outcome.diagnostics[&PathBuf::from("/ws/a.art")];
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn unmatched_closing_brace_is_a_diagnostic() {
        let frontend = ReferenceFrontend::new();
        let outcome = frontend.compile(&request(vec![file("fn main() {\n}\n}")], false));
        assert!(!outcome.parsed_all);
    }

    #[test]
    fn safe_mode_excludes_failed_files_from_symbol_map() {
        let frontend = ReferenceFrontend::new();
        let outcome = frontend.compile(&request(vec![file("fn broken( {")], true));
        assert!(!outcome.parsed_all);
        assert!(outcome.symbols.lookup("broken").is_empty());
        assert_eq!(outcome.skipped_files, vec![PathBuf::from("/ws/a.art")]);
    }

    #[test]
    fn every_file_gets_a_diagnostics_entry_even_when_empty() {
        let frontend = ReferenceFrontend::new();
        let outcome = frontend.compile(&request(vec![file("fn ok() {}")], false));
        assert!(outcome.diagnostics[&PathBuf::from("/ws/a.art")].is_empty());
    }
}
