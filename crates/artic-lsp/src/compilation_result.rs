// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The cached `CompilationResult` (§3): at most one exists in the
//! orchestrator at a time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use artic_compiler_frontend::{CompileDiagnostic, SymbolMap};

/// The outcome of the most recent build, plus the file set that triggered
/// it.
///
/// Invariant (§3): `files` is a superset of every file for which requests
/// can be served from this result — `covers` is exactly that check.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    pub files: Vec<PathBuf>,
    pub active_file: PathBuf,
    pub symbols: SymbolMap,
    pub diagnostics: HashMap<PathBuf, Vec<CompileDiagnostic>>,
    pub parsed_all: bool,
}

impl CompilationResult {
    /// Whether a request targeting `file` can be served from this result
    /// without rebuilding (§4.5 trigger matrix: "If the current result
    /// already covers the target file").
    pub fn covers(&self, file: &Path) -> bool {
        self.files.iter().any(|f| f == file)
    }
}
