// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Project discovery: walking a source file's ancestor directories to find
//! the config document (and project within it) that owns it (§4.4 step 1).

use std::path::Path;

use artic_arena::ProjectHandle;
use artic_project_config::CONFIG_FILE_NAMES;

use crate::Workspace;

impl Workspace {
    /// Resolves the project that owns `file`, walking parent directories
    /// upward toward `/` and caching the result (§4.4 step 1).
    pub fn resolve_project_for_file(&mut self, file: &Path) -> Option<ProjectHandle> {
        let canonical = artic_glob::weak_canonicalize(file);
        if let Some(cached) = self.project_cache.get(&canonical) {
            return cached.clone();
        }

        let mut dir = canonical.parent().map(Path::to_path_buf);
        let result = loop {
            let Some(current) = dir else {
                break None;
            };
            if let Some(handle) = self.check_directory_for_config(&current, &canonical) {
                break Some(handle);
            }
            if current == Path::new("/") {
                break None;
            }
            dir = current.parent().map(Path::to_path_buf);
        };

        self.project_cache.insert(canonical, result.clone());
        result
    }

    /// Checks one directory for a recognized config filename, in priority
    /// order. If one exists, that document — and only that document — is
    /// used to decide this directory's answer (whether it parses or not);
    /// `None` here means "no match here, the walk continues upward", not
    /// "try the next recognized filename".
    fn check_directory_for_config(&mut self, dir: &Path, file: &Path) -> Option<ProjectHandle> {
        let candidate = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())?;

        self.load_config(&candidate, false, 0);

        let canonical_candidate = artic_glob::weak_canonicalize(&candidate);
        let config = self.arena.find_config(&canonical_candidate)?.clone();

        for project_name in &config.declared_projects {
            if self.project_uses_file(project_name, file) {
                return Some(ProjectHandle::new(project_name.clone()));
            }
        }

        if let Some(default) = &config.default_project {
            if self.arena.has_project(default) {
                return Some(ProjectHandle::new(default.clone()));
            }
        }

        None
    }
}
