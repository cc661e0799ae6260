// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Assembling the ordered, deduplicated file set that must be compiled
//! together for a given source file (§4.4 step 5), and the transitive
//! "uses-file" test (§4.4 step 3) it's built on.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use artic_project_config::ConfigDiagnostic;

use crate::Workspace;

impl Workspace {
    /// Whether `name` uses `file`, directly or through any dependency,
    /// transitively (§4.4 step 3).
    pub fn project_uses_file(&mut self, name: &str, file: &Path) -> bool {
        self.collect_transitive(name).iter().any(|f| f == file)
    }

    /// Collects every file reachable from project `name` through its
    /// dependency graph, deduplicated, first-seen order (§4.4 steps 3 and
    /// 5 share this traversal).
    fn collect_transitive(&mut self, name: &str) -> Vec<PathBuf> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut files = Vec::new();
        let mut seen_files = HashSet::new();
        self.collect_transitive_rec(name, &mut visited, &mut on_stack, &mut files, &mut seen_files);
        files
    }

    /// `visited` is "already collected, skip silently" — a project reached
    /// a second time via a different branch (a diamond: `app` depending on
    /// both `lib` and `util`, which both depend on `core`) is not a cycle.
    /// `on_stack` tracks only the projects on the *current* recursion path;
    /// a dependency is a cycle iff it's still on that stack, not merely
    /// present in `visited` (§4.4 "Cycle handling for dependencies", §8
    /// property 7).
    fn collect_transitive_rec(
        &mut self,
        name: &str,
        visited: &mut HashSet<String>,
        on_stack: &mut HashSet<String>,
        files: &mut Vec<PathBuf>,
        seen_files: &mut HashSet<PathBuf>,
    ) {
        if !visited.insert(name.to_string()) {
            return;
        }
        if !self.arena.has_project(name) {
            return;
        }

        for path in self.materialize(name) {
            if seen_files.insert(path.clone()) {
                files.push(path);
            }
        }

        let dependencies = self
            .arena
            .project(name)
            .map(|project| project.dependencies.clone())
            .unwrap_or_default();

        on_stack.insert(name.to_string());

        for dependency in dependencies {
            if !self.arena.has_project(&dependency) {
                self.report_unresolved_dependency(name, &dependency);
                continue;
            }
            if on_stack.contains(&dependency) {
                self.report_cycle(name, &dependency);
                continue;
            }
            if visited.contains(&dependency) {
                continue;
            }
            self.collect_transitive_rec(&dependency, visited, on_stack, files, seen_files);
        }

        on_stack.remove(name);
    }

    fn report_unresolved_dependency(&mut self, project: &str, dependency: &str) {
        let key = (project.to_string(), dependency.to_string());
        if !self.reported_unresolved.insert(key) {
            return;
        }
        let origin = self
            .arena
            .project(project)
            .map(|p| p.origin.clone())
            .unwrap_or_default();
        self.diagnostics.push(
            ConfigDiagnostic::error(
                format!("project `{project}` depends on unknown project `{dependency}`"),
                origin,
            )
            .with_literal(dependency.to_string()),
        );
    }

    fn report_cycle(&mut self, project: &str, dependency: &str) {
        let key = (project.to_string(), dependency.to_string());
        if !self.reported_cycles.insert(key) {
            return;
        }
        let origin = self
            .arena
            .project(project)
            .map(|p| p.origin.clone())
            .unwrap_or_default();
        self.diagnostics.push(
            ConfigDiagnostic::error(
                format!("cyclic dependency: `{project}` depends on `{dependency}`, which depends (transitively) back on `{project}`"),
                origin,
            )
            .with_literal(dependency.to_string()),
        );
    }

    /// Assembles the compilation unit for `file` (§4.4 step 5): resolves
    /// its project, collects every file reachable through dependencies,
    /// and — if `file` itself isn't among them — appends it as a synthetic
    /// member so the compile-set superset property (§8 property 4) always
    /// holds.
    pub fn compile_set(&mut self, file: &Path) -> Vec<PathBuf> {
        let canonical = artic_glob::weak_canonicalize(file);
        let project = self.resolve_project_for_file(&canonical);

        let mut files = match &project {
            Some(handle) => self.collect_transitive(handle.as_str()),
            None => Vec::new(),
        };

        if !files.iter().any(|f| f == &canonical) {
            tracing::debug!(
                file = %canonical.display(),
                project = project.as_ref().map(|p| p.as_str()),
                "augmenting compile set with a file not covered by its project"
            );
            files.push(canonical);
        }

        files
    }
}
