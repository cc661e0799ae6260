// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Handle types for the arena's interned tables (§4.3 `[AMBIENT]`).
//!
//! `FileId` and `ConfigId` carry the arena's generation counter alongside
//! their index, so a handle obtained before a `reload()` cannot silently
//! resolve against the rebuilt arena: [`Arena::get_file`] and
//! [`Arena::get_config`] return `None` for a handle from a stale
//! generation instead of an unrelated (but index-valid) record. Projects
//! are addressed by name directly (`ProjectHandle`) rather than by index,
//! since dependency edges in a config document are names, not handles, and
//! resolving them lazily at traversal time is exactly the point of §9's
//! "arena + handles replaces shared pointers" design.

use std::fmt;

/// A handle to an interned [`crate::File`]. Only [`crate::Arena`]
/// constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

/// A handle to an interned [`crate::ConfigDocument`]. Only [`crate::Arena`]
/// constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigId {
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

/// A named reference to a project, resolved against the arena's project
/// table at traversal time rather than held as a pointer. This is what
/// breaks the ownership cycle a project's `dependencies` list would
/// otherwise create: a `ProjectHandle` is just a `String` clone, valid (or
/// not) depending on what's currently registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectHandle(pub String);

impl ProjectHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProjectHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
