// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Project discovery, config-graph resolution, and compile-set assembly
//! (§4.4).
//!
//! This is the core of the language server: given a source file, decide
//! which other files must be compiled alongside it for meaningful
//! cross-file analysis, by walking a (possibly cyclic) graph of
//! declarative config documents. Everything here is driven through
//! [`Workspace`], which owns the arena and every resolution cache.

mod compile_set;
mod config_graph;
mod discovery;
mod materialize;
mod workspace;

pub use workspace::Workspace;

pub use artic_arena::{Arena, ProjectHandle};
pub use artic_project_config::{ConfigDiagnostic, Severity};
