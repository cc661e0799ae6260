// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The `Workspace` struct: owns the arena, the accumulated configuration
//! diagnostics, and the per-reload caches the resolution algorithm relies
//! on (§4.4 invariant (d)).

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use artic_arena::{Arena, ProjectHandle};
use artic_project_config::ConfigDiagnostic;

/// Owns the config graph, the project/file/config arena, and the caches
/// that make repeated resolution cheap between reloads.
///
/// A `Workspace` corresponds to one LSP session's view of the project
/// tree. It is not `Send`/`Sync` — the single-threaded message loop (§5)
/// is the only caller.
pub struct Workspace {
    pub(crate) arena: Arena,
    pub(crate) diagnostics: Vec<ConfigDiagnostic>,
    /// Project-discovery results, keyed by canonicalized file path (§4.4
    /// invariant (d): "cached until the next reload or until a watched
    /// config changes").
    pub(crate) project_cache: HashMap<PathBuf, Option<ProjectHandle>>,
    /// Dedup keys for "unresolved dependency" diagnostics already emitted
    /// this generation, so repeated traversals of the same edge (project
    /// discovery re-checks `uses_file` for every candidate file) don't
    /// re-report the same problem.
    pub(crate) reported_unresolved: HashSet<(String, String)>,
    /// Same, for cyclic-dependency edges.
    pub(crate) reported_cycles: HashSet<(String, String)>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            diagnostics: Vec::new(),
            project_cache: HashMap::new(),
            reported_unresolved: HashSet::new(),
            reported_cycles: HashSet::new(),
        }
    }

    /// Clears the arena and every cache, invalidating all previously
    /// issued handles and cached resolutions (§4.4 "Reload"). Callers
    /// (the compile orchestrator) are responsible for also invalidating
    /// any cached `CompilationResult`.
    pub fn reload(&mut self) {
        tracing::info!("reloading workspace");
        self.arena.clear();
        self.diagnostics.clear();
        self.project_cache.clear();
        self.reported_unresolved.clear();
        self.reported_cycles.clear();
    }

    /// Whether a config save at `path` can possibly affect any cached
    /// resolution — the per-config-change optimization of §4.4: "if the
    /// changed file's canonical path is not currently tracked, the change
    /// is ignored."
    pub fn config_change_requires_reload(&self, path: &std::path::Path) -> bool {
        self.arena.is_config_tracked(path)
    }

    pub fn diagnostics(&self) -> &[ConfigDiagnostic] {
        &self.diagnostics
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Interns `path` and stores client-supplied text on it, overriding
    /// disk contents (editor open or full-text didChange, §5 "Shared
    /// resources").
    pub fn set_file_text(&mut self, path: &std::path::Path, text: String) {
        self.arena.set_file_text(path, text);
    }

    /// Drops a file's in-memory buffer, reverting to disk (editor close).
    pub fn clear_file_buffer(&mut self, path: &std::path::Path) {
        if let Some((id, _)) = self.arena.find_file(path) {
            if let Some(file) = self.arena.get_file_mut(id) {
                file.clear_buffer();
            }
        }
    }

    /// Reads a file's current text (buffer if open, else disk), interning
    /// it into the arena first so it's tracked for future lookups.
    pub fn read_file_text(&mut self, path: &std::path::Path) -> std::io::Result<String> {
        let id = self.arena.intern_file(path);
        self.arena.get_file(id).expect("just interned").text()
    }
}
