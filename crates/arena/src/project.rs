// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The runtime `Project` record (§3): a [`ProjectDef`] plus a depth for
//! tie-breaking and a lazily-populated, cached materialized file list.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use artic_project_config::{FilePattern, ProjectDef};

/// A project registered in the arena's project table.
///
/// The materialized file list is populated on first access by the
/// workspace resolver (§4.4 step 4) and cached here — recomputing it is
/// the Glob Expander's job, not this crate's, so the cache is a plain
/// `Option` behind a `RefCell` rather than something this crate computes
/// itself.
#[derive(Debug)]
pub struct Project {
    pub name: String,
    pub origin: PathBuf,
    pub root: PathBuf,
    pub patterns: Vec<FilePattern>,
    pub dependencies: Vec<String>,
    /// Smaller is closer to the workspace root; used to break ties when
    /// two documents declare a project of the same name with differing
    /// origins (§9 "first-seen in discovery order" — depth is recorded but
    /// the tie-break itself is first-seen, not depth-sorted; see
    /// DESIGN.md).
    pub depth: u32,
    materialized: RefCell<Option<Vec<PathBuf>>>,
}

impl Project {
    pub fn from_def(def: ProjectDef, depth: u32) -> Self {
        Self {
            name: def.name,
            origin: def.origin,
            root: def.root,
            patterns: def.patterns,
            dependencies: def.dependencies,
            depth,
            materialized: RefCell::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_materialized(&self) -> bool {
        self.materialized.borrow().is_some()
    }

    /// Returns the cached materialized file list, if any has been computed
    /// yet.
    pub fn materialized_files(&self) -> Option<Vec<PathBuf>> {
        self.materialized.borrow().clone()
    }

    /// Caches a freshly computed file list (§4.4 step 4: "Results are
    /// cached on the `Project`").
    pub fn set_materialized(&self, files: Vec<PathBuf>) {
        *self.materialized.borrow_mut() = Some(files);
    }

    pub fn uses_file_directly(&self, path: &Path) -> bool {
        self.materialized_files()
            .is_some_and(|files| files.iter().any(|f| f == path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str) -> ProjectDef {
        ProjectDef {
            name: name.to_string(),
            origin: PathBuf::from("/ws/artic.json"),
            root: PathBuf::from("/ws"),
            patterns: vec![],
            dependencies: vec![],
        }
    }

    #[test]
    fn materialized_cache_starts_empty() {
        let project = Project::from_def(def("main"), 0);
        assert!(!project.is_materialized());
        assert!(project.materialized_files().is_none());
    }

    #[test]
    fn materialized_cache_round_trips() {
        let project = Project::from_def(def("main"), 0);
        let files = vec![PathBuf::from("/ws/a.art")];
        project.set_materialized(files.clone());
        assert!(project.is_materialized());
        assert_eq!(project.materialized_files(), Some(files));
    }
}
