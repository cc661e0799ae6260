// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Process-wide interned storage for files, projects, and config
//! documents (§4.3).
//!
//! This crate owns no resolution logic — it doesn't know how a project's
//! dependency names get resolved, how patterns get expanded into file
//! lists, or how a source file maps to a project. It only guarantees that
//! a canonical path or project name maps to a single, stable record for
//! the lifetime of the current arena generation. `artic-workspace` builds
//! the resolution logic on top.

mod arena;
mod error;
mod file;
mod ids;
mod project;

pub use arena::Arena;
pub use error::ArenaError;
pub use file::File;
pub use ids::{ConfigId, FileId, ProjectHandle};
pub use project::Project;

pub use artic_project_config::ConfigDocument;
