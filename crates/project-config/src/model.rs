// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The structured representation a config document parses into: declared
//! projects, a default project, and include references (§4.2, §9).

use std::path::PathBuf;

/// One `include` entry, exhaustively representing the three shapes the
/// grammar allows rather than mixing string sentinels into a single type
/// (§9, "Sum types for include references and project-identity").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// A required include: a missing target is an error.
    Path(PathBuf),
    /// An include written with a trailing `?`: a missing target is silently
    /// skipped.
    OptionalPath(PathBuf),
    /// The deprecated `<global>` sentinel. Never expanded; its presence
    /// only produces a warning.
    DeprecatedGlobal,
}

/// A single `include` array entry together with the literal it was parsed
/// from, for diagnostic tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeReference {
    pub kind: Include,
    /// The exact string as written in the `include` array, before `?`
    /// stripping or path resolution — used to locate the diagnostic in the
    /// source text.
    pub literal: String,
}

/// A non-exclusion or exclusion file pattern from a project's `files`
/// array. `!`-prefixed entries are exclusions (§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    Include(String),
    Exclude(String),
}

impl FilePattern {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('!') {
            Some(rest) => FilePattern::Exclude(rest.to_string()),
            None => FilePattern::Include(raw.to_string()),
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            FilePattern::Include(p) | FilePattern::Exclude(p) => p,
        }
    }
}

/// A project as declared in exactly one config document, before its
/// dependency names are resolved and before its file list is materialized.
///
/// This is the structural output of the parser (§4.2's "Output"); the
/// arena turns it into a runtime `Project` record with a materialized file
/// list and a depth.
#[derive(Debug, Clone)]
pub struct ProjectDef {
    pub name: String,
    /// The document this definition came from.
    pub origin: PathBuf,
    /// Root directory for relative globs: the resolved `folder`, or the
    /// document's directory on fallback (§3, Project invariants).
    pub root: PathBuf,
    pub patterns: Vec<FilePattern>,
    /// Raw dependency names, unresolved (§3: "to permit forward/cyclic
    /// references").
    pub dependencies: Vec<String>,
}

/// A parsed configuration document (§3 `ConfigDocument`).
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub version: String,
    /// Names of projects declared directly in this document, in
    /// declaration order (including an inline `default-project`, appended
    /// last, per the order the parser encounters it).
    pub declared_projects: Vec<String>,
    pub default_project: Option<String>,
    pub includes: Vec<IncludeReference>,
}

/// Everything the parser produces for one document: the document record
/// itself plus the structural project definitions it declared.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    pub document: ConfigDocument,
    pub projects: Vec<ProjectDef>,
}
