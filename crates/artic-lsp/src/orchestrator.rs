// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The Compile Orchestrator (§4.5): owns at most one `CompilationResult`,
//! rebuilds it per the trigger matrix, and hands the LSP adapter back
//! exactly what it needs to publish diagnostics.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use artic_compiler_frontend::{CompileDiagnostic, CompileFrontend, CompileRequest, CompileRequestFile};
use artic_project_config::ConfigDiagnostic;
use artic_workspace::Workspace;

use crate::compilation_result::CompilationResult;

/// The feature a symbol-lookup request is asking for (§4.5 trigger
/// matrix). `SemanticTokens`/`InlayHints` never trigger a compile of their
/// own — they ride on whatever result the preceding edit already built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Definition,
    References,
    Rename,
    Completion,
    DebugAst,
    SemanticTokens,
    InlayHints,
}

impl RequestKind {
    fn triggers_build(self) -> bool {
        !matches!(self, RequestKind::SemanticTokens | RequestKind::InlayHints)
    }
}

/// Diagnostics produced by one `rebuild` call, already grouped by the file
/// they concern — one entry per file in the compile set, even when empty
/// (§4.5 "Building" step 7).
pub struct BuildReport {
    pub compile_set: Vec<PathBuf>,
    pub diagnostics: HashMap<PathBuf, Vec<CompileDiagnostic>>,
}

pub struct Orchestrator<F: CompileFrontend> {
    workspace: Workspace,
    frontend: F,
    current: Option<CompilationResult>,
    safe_mode: bool,
}

impl<F: CompileFrontend> Orchestrator<F> {
    pub fn new(frontend: F) -> Self {
        Self {
            workspace: Workspace::new(),
            frontend,
            current: None,
            safe_mode: false,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn current(&self) -> Option<&CompilationResult> {
        self.current.as_ref()
    }

    pub fn safe_mode(&self) -> bool {
        self.safe_mode
    }

    /// Signals that this session started after a crash (§5, §6
    /// `restartFromCrash`): the next compile skips non-parsing files.
    pub fn enable_safe_mode(&mut self) {
        self.safe_mode = true;
    }

    /// Source file opened: rebuild only if no result yet covers it (§4.5
    /// trigger matrix, row 1).
    pub fn on_source_opened(&mut self, file: &Path, text: String) -> Option<BuildReport> {
        self.workspace.set_file_text(file, text);
        let canonical = artic_glob::weak_canonicalize(file);
        if self.current.as_ref().is_some_and(|r| r.covers(&canonical)) {
            return None;
        }
        Some(self.rebuild(&canonical))
    }

    /// Source file changed (full-text sync): always rebuild (§4.5 trigger
    /// matrix, row 2).
    pub fn on_source_changed(&mut self, file: &Path, text: String) -> BuildReport {
        self.workspace.set_file_text(file, text);
        let canonical = artic_glob::weak_canonicalize(file);
        self.rebuild(&canonical)
    }

    /// Source file saved: no-op (§4.5 trigger matrix, row 3).
    pub fn on_source_saved(&mut self, _file: &Path) {}

    /// Source file closed: drops the editor buffer, reverting to disk.
    pub fn on_source_closed(&mut self, file: &Path) {
        self.workspace.clear_file_buffer(file);
    }

    /// Config file opened via the editor: always a full reload (§4.5
    /// trigger matrix, row 4).
    pub fn on_config_opened(&mut self) {
        self.full_reload();
    }

    /// Config file saved: the per-config-change optimization of §4.4 — if
    /// the file isn't currently tracked, the save can't affect anything
    /// cached, so it's ignored. Returns whether a reload happened.
    pub fn on_config_saved(&mut self, path: &Path) -> bool {
        if self.workspace.config_change_requires_reload(path) {
            self.full_reload();
            true
        } else {
            false
        }
    }

    /// A watched config file was created, changed, or deleted
    /// (`workspace/didChangeWatchedFiles`). Per §9's open-question
    /// decision, every kind reloads unconditionally — unlike a plain save,
    /// a filesystem-level event might be the *first* appearance of a
    /// config that previously didn't exist, which the "currently tracked"
    /// check can never catch.
    pub fn on_watched_config_event(&mut self, _path: &Path) {
        self.full_reload();
    }

    fn full_reload(&mut self) {
        self.workspace.reload();
        self.current = None;
    }

    /// Resolves a symbol-lookup request per the trigger matrix: reuse the
    /// current result if it already covers `file`; otherwise build for it,
    /// unless `kind` is one of the no-compile features.
    pub fn ensure_compiled(&mut self, file: &Path, kind: RequestKind) -> Option<&CompilationResult> {
        let canonical = artic_glob::weak_canonicalize(file);
        if self.current.as_ref().is_some_and(|r| r.covers(&canonical)) {
            return self.current.as_ref();
        }
        if kind.triggers_build() {
            self.rebuild(&canonical);
        }
        self.current.as_ref()
    }

    /// The "Building" procedure (§4.5 steps 1-7, minus step 1's
    /// canonicalization, already done by callers).
    fn rebuild(&mut self, canonical_file: &Path) -> BuildReport {
        let compile_set = self.workspace.compile_set(canonical_file);

        let files: Vec<CompileRequestFile> = compile_set
            .iter()
            .map(|path| {
                let text = self.workspace.read_file_text(path).unwrap_or_default();
                CompileRequestFile {
                    path: path.clone(),
                    text,
                }
            })
            .collect();

        let was_safe_mode = self.safe_mode;
        let request = CompileRequest {
            files,
            active_file: canonical_file.to_path_buf(),
            safe_mode: was_safe_mode,
        };
        let outcome = self.frontend.compile(&request);

        if was_safe_mode && outcome.parsed_all {
            tracing::info!("every file parsed cleanly, leaving safe mode");
            self.safe_mode = false;
        }

        self.current = Some(CompilationResult {
            files: compile_set.clone(),
            active_file: canonical_file.to_path_buf(),
            symbols: outcome.symbols,
            diagnostics: outcome.diagnostics.clone(),
            parsed_all: outcome.parsed_all,
        });

        BuildReport {
            compile_set,
            diagnostics: outcome.diagnostics,
        }
    }

    /// The full, currently accumulated set of configuration diagnostics
    /// (§4.5 "Diagnostic routing": "persist until the next reload").
    pub fn config_diagnostics(&self) -> &[ConfigDiagnostic] {
        self.workspace.diagnostics()
    }
}
