// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The data shapes that cross the orchestrator/frontend boundary (§1, §3
//! `CompilationResult`).

use std::collections::HashMap;
use std::path::PathBuf;

/// Severity of a diagnostic produced by the compile frontend (lexing,
/// binding, or type errors). Distinct from `artic-project-config`'s
/// `Severity` — this one never needs `Info`/`Hint`, the frontend only ever
/// reports syntax/semantic problems as errors or warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A 1-based (line, column) location in a source file, matching the
/// internal convention the LSP adapter converts from (§4.6, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// One diagnostic produced while compiling a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

/// One file to compile together as part of a unit: its path and its
/// current text (from the arena's buffer or disk — the orchestrator
/// resolves that before calling in).
#[derive(Debug, Clone)]
pub struct CompileRequestFile {
    pub path: PathBuf,
    pub text: String,
}

/// The request passed to [`crate::CompileFrontend::compile`] (§4.5
/// "Building").
#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub files: Vec<CompileRequestFile>,
    pub active_file: PathBuf,
    /// When set, the frontend skips files that fail to parse rather than
    /// reporting their diagnostics and excluding them from the symbol map
    /// (§4.5 "Safe mode").
    pub safe_mode: bool,
}

/// A declaration recorded in the opaque symbol map, keyed by name.
///
/// The spec treats the symbol map as opaque to the orchestrator (§3); this
/// shape is the reference frontend's own choice of what a "declaration"
/// looks like; a real `artic`/`impala` frontend would carry far richer
/// information (types, scopes, overloads).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub file: PathBuf,
    pub location: Location,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Binding,
}

/// The opaque symbol map built by one compile (§3 "the symbol map —
/// external — opaque to this spec").
#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    by_name: HashMap<String, Vec<Symbol>>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.by_name.entry(symbol.name.clone()).or_default().push(symbol);
    }

    pub fn lookup(&self, name: &str) -> &[Symbol] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn all(&self) -> impl Iterator<Item = &Symbol> {
        self.by_name.values().flatten()
    }
}

/// What a single `compile()` call produces (§3 `CompilationResult`,
/// minus the active-file/file-set bookkeeping the orchestrator itself
/// owns).
#[derive(Debug, Clone, Default)]
pub struct CompileOutcome {
    /// Diagnostics grouped by the file they concern — a file with no
    /// diagnostics is still present with an empty `Vec` so the caller can
    /// publish the empty-list notification that clears stale markers
    /// (§4.5 "Building" step 7).
    pub diagnostics: HashMap<PathBuf, Vec<CompileDiagnostic>>,
    pub symbols: SymbolMap,
    /// Whether every file in the request parsed without error. Drives
    /// safe-mode clearing (§4.5 "Safe mode").
    pub parsed_all: bool,
    /// Files safe mode skipped entirely (only ever non-empty when
    /// `safe_mode` was set on the request).
    pub skipped_files: Vec<PathBuf>,
}
