// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The process-wide interned store (§4.3): three tables, keyed by
//! canonical path (files, configs) or unique name (projects). Owned by a
//! single `Workspace` instance; `reload` clears it and rebuilds from
//! scratch (§4.4 "Reload").

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use artic_project_config::ConfigDocument;

use crate::error::ArenaError;
use crate::file::File;
use crate::ids::{ConfigId, FileId, ProjectHandle};
use crate::project::Project;

/// The arena: owns every `File`, `Project`, and `ConfigDocument` for the
/// current session generation.
///
/// Single-threaded by design (§5): nothing here is `Sync`, and nothing
/// needs to be.
#[derive(Debug, Default)]
pub struct Arena {
    generation: u64,
    files: Vec<File>,
    file_index: HashMap<PathBuf, usize>,
    projects: HashMap<String, Project>,
    configs: Vec<ConfigDocument>,
    config_index: HashMap<PathBuf, usize>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clears every table and bumps the generation counter, invalidating
    /// every handle issued before this call (§4.4 "Reload").
    pub fn clear(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    // ---- Files ----------------------------------------------------

    /// Interns `path` (weakly canonicalized), returning its stable handle.
    /// Idempotent: interning the same path twice returns the same id.
    pub fn intern_file(&mut self, path: &Path) -> FileId {
        let canonical = artic_glob::weak_canonicalize(path);
        if let Some(&index) = self.file_index.get(&canonical) {
            return FileId {
                generation: self.generation,
                index,
            };
        }
        let index = self.files.len();
        self.files.push(File::new(canonical.clone()));
        self.file_index.insert(canonical, index);
        FileId {
            generation: self.generation,
            index,
        }
    }

    pub fn get_file(&self, id: FileId) -> Option<&File> {
        if id.generation != self.generation {
            return None;
        }
        self.files.get(id.index)
    }

    pub fn get_file_mut(&mut self, id: FileId) -> Option<&mut File> {
        if id.generation != self.generation {
            return None;
        }
        self.files.get_mut(id.index)
    }

    /// Looks up a file by canonical path without creating it.
    pub fn find_file(&self, path: &Path) -> Option<(FileId, &File)> {
        let canonical = artic_glob::weak_canonicalize(path);
        let index = *self.file_index.get(&canonical)?;
        Some((
            FileId {
                generation: self.generation,
                index,
            },
            &self.files[index],
        ))
    }

    /// Interns `path` and sets its buffer in one step (editor open/change).
    pub fn set_file_text(&mut self, path: &Path, text: String) -> FileId {
        let id = self.intern_file(path);
        self.get_file_mut(id).expect("just interned").set_text(text);
        id
    }

    // ---- Projects ---------------------------------------------------

    /// Registers a project. Fails if a project of the same name is already
    /// registered — callers are expected to have already decided (per
    /// §4.4 step 2, "first-seen wins") whether to call this at all; this
    /// is a last-resort invariant check, not how duplicates are normally
    /// handled.
    pub fn insert_project(&mut self, project: Project) -> Result<ProjectHandle, ArenaError> {
        if self.projects.contains_key(&project.name) {
            return Err(ArenaError::DuplicateProject(project.name));
        }
        let handle = ProjectHandle::new(project.name.clone());
        self.projects.insert(project.name.clone(), project);
        Ok(handle)
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    pub fn has_project(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    // ---- Config documents --------------------------------------------

    pub fn is_config_tracked(&self, path: &Path) -> bool {
        let canonical = artic_glob::weak_canonicalize(path);
        self.config_index.contains_key(&canonical)
    }

    pub fn get_config(&self, id: ConfigId) -> Option<&ConfigDocument> {
        if id.generation != self.generation {
            return None;
        }
        self.configs.get(id.index)
    }

    pub fn find_config(&self, path: &Path) -> Option<&ConfigDocument> {
        let canonical = artic_glob::weak_canonicalize(path);
        let index = *self.config_index.get(&canonical)?;
        Some(&self.configs[index])
    }

    /// Interns a freshly parsed document, replacing any prior record at
    /// the same path (§3 "replaced atomically on reload").
    pub fn insert_config(&mut self, document: ConfigDocument) -> ConfigId {
        let canonical = artic_glob::weak_canonicalize(&document.path);
        if let Some(&index) = self.config_index.get(&canonical) {
            self.configs[index] = document;
            return ConfigId {
                generation: self.generation,
                index,
            };
        }
        let index = self.configs.len();
        self.configs.push(document);
        self.config_index.insert(canonical, index);
        ConfigId {
            generation: self.generation,
            index,
        }
    }

    pub fn config_count(&self) -> usize {
        self.configs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_path_twice_is_idempotent() {
        let mut arena = Arena::new();
        let a = arena.intern_file(Path::new("/tmp/a.art"));
        let b = arena.intern_file(Path::new("/tmp/./a.art"));
        assert_eq!(a, b);
        assert_eq!(arena.find_file(Path::new("/tmp/a.art")).unwrap().0, a);
    }

    #[test]
    fn clear_invalidates_old_handles() {
        let mut arena = Arena::new();
        let id = arena.intern_file(Path::new("/tmp/a.art"));
        assert!(arena.get_file(id).is_some());
        arena.clear();
        assert!(arena.get_file(id).is_none());
    }

    #[test]
    fn duplicate_project_name_is_rejected() {
        let mut arena = Arena::new();
        let def = artic_project_config::ProjectDef {
            name: "main".to_string(),
            origin: PathBuf::from("/ws/artic.json"),
            root: PathBuf::from("/ws"),
            patterns: vec![],
            dependencies: vec![],
        };
        arena.insert_project(Project::from_def(def.clone(), 0)).unwrap();
        let err = arena.insert_project(Project::from_def(def, 0)).unwrap_err();
        assert!(matches!(err, ArenaError::DuplicateProject(_)));
    }
}
