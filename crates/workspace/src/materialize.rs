// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Materializing a project's file list from its raw patterns (§4.4 step
//! 4).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use artic_glob::GlobDiagnostic;
use artic_project_config::{ConfigDiagnostic, FilePattern, Severity};

use crate::Workspace;

impl Workspace {
    /// Returns the cached materialized file list for `name`, computing and
    /// caching it on first access.
    ///
    /// **Open question resolved (§9): exclusions win unconditionally.**
    /// Every inclusion pattern is expanded first into one deduplicated,
    /// first-seen-ordered union; every exclusion pattern is then expanded
    /// and subtracted from that union wholesale, regardless of whether a
    /// given path was matched by a literal segment or a wildcard.
    pub fn materialize(&mut self, name: &str) -> Vec<PathBuf> {
        let Some(project) = self.arena.project(name) else {
            return Vec::new();
        };
        if let Some(cached) = project.materialized_files() {
            return cached;
        }

        let root = project.root().to_path_buf();
        let patterns = project.patterns.clone();
        let origin = project.origin.clone();

        let mut included = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();
        for pattern in &patterns {
            if let FilePattern::Include(raw) = pattern {
                let matches = self.expand_pattern(&root, raw, &origin);
                for path in matches {
                    if seen.insert(path.clone()) {
                        included.push(path);
                    }
                }
            }
        }

        let mut excluded: HashSet<PathBuf> = HashSet::new();
        for pattern in &patterns {
            if let FilePattern::Exclude(raw) = pattern {
                let matches = self.expand_pattern(&root, raw, &origin);
                if matches.is_empty() {
                    self.diagnostics.push(
                        ConfigDiagnostic::warning(
                            format!("exclusion pattern `{raw}` matched no files"),
                            origin.clone(),
                        )
                        .with_literal(raw.clone()),
                    );
                }
                excluded.extend(matches);
            }
        }

        let result: Vec<PathBuf> = included.into_iter().filter(|p| !excluded.contains(p)).collect();

        if let Some(project) = self.arena.project(name) {
            project.set_materialized(result.clone());
        }
        result
    }

    fn expand_pattern(&mut self, root: &Path, pattern: &str, origin: &Path) -> Vec<PathBuf> {
        let mut sink: Vec<GlobDiagnostic> = Vec::new();
        let matches = artic_glob::expand(root, pattern, &mut sink);
        for diag in sink {
            let severity = match diag.severity {
                artic_glob::Severity::Error => Severity::Error,
                artic_glob::Severity::Warning => Severity::Warning,
            };
            self.diagnostics.push(
                ConfigDiagnostic::new(severity, diag.message, origin.to_path_buf()).with_literal(diag.tag),
            );
        }
        matches
    }
}
