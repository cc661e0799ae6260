// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Loading one configuration document and recursively following its
//! includes (§4.4 step 2).

use std::path::Path;

use artic_arena::Project;
use artic_project_config::{parse_config, ConfigDiagnostic, Include};

use crate::Workspace;

impl Workspace {
    /// Loads the config document at `path` if it isn't already tracked,
    /// interning it and its directly-declared projects, then recursively
    /// loading every include.
    ///
    /// Interning the document *before* recursing into its includes is what
    /// makes `is_config_tracked` double as the include-cycle visited-set
    /// (§4.4 "Cycle handling for config includes"): a cyclic include back
    /// to a document already being loaded finds it tracked and stops.
    ///
    /// `depth` is the distance from the document that triggered discovery
    /// (0), used to break ties between same-named projects declared in
    /// different documents (§3 `Project::depth`, §9).
    pub fn load_config(&mut self, path: &Path, optional: bool, depth: u32) {
        let canonical = artic_glob::weak_canonicalize(path);
        if self.arena.is_config_tracked(&canonical) {
            return;
        }

        let mut log = Vec::new();
        let parsed = match parse_config(&canonical, optional, &mut log) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.diagnostics.extend(log);
                return;
            }
        };
        self.diagnostics.extend(log);

        let includes = parsed.document.includes.clone();
        self.arena.insert_config(parsed.document);

        for def in parsed.projects {
            self.register_project(def, depth);
        }

        for include in includes {
            match include.kind {
                Include::Path(target) => self.load_config(&target, false, depth + 1),
                Include::OptionalPath(target) => self.load_config(&target, true, depth + 1),
                Include::DeprecatedGlobal => {
                    // never expanded, already warned at parse time
                }
            }
        }
    }

    /// Registers a structurally-parsed project into the arena, applying
    /// the cross-document duplicate-name policy (§4.4 step 2, §9): the
    /// first-seen definition wins; a later one with a differing origin
    /// warns, a later one with the *same* origin (e.g. the document was
    /// reached twice via different include chains before cycle detection
    /// kicked in) is tolerated silently.
    pub(crate) fn register_project(&mut self, def: artic_project_config::ProjectDef, depth: u32) {
        if let Some(existing) = self.arena.project(&def.name) {
            if existing.origin != def.origin {
                self.diagnostics.push(
                    ConfigDiagnostic::warning(
                        format!(
                            "project `{}` is already defined in `{}`; keeping that definition",
                            def.name,
                            existing.origin.display()
                        ),
                        def.origin.clone(),
                    )
                    .with_literal(def.name.clone()),
                );
            }
            return;
        }
        let project = Project::from_def(def, depth);
        self.arena
            .insert_project(project)
            .expect("duplicate checked above");
    }
}
