// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Parses `.artic-lsp` / `artic.json` project configuration documents
//! (§4.2) into a structured representation: declared projects, a default
//! project, and include references, with diagnostics tied to literal JSON
//! tokens.
//!
//! This crate is stateless per document — it knows nothing about the
//! config graph, project dependency resolution, or which files a project's
//! patterns materialize to. That's `artic-workspace`'s job; this crate
//! only turns one JSON document into [`ParsedConfig`].

mod diagnostic;
mod error;
mod literal_locator;
mod model;
mod parser;
mod schema;

pub use diagnostic::{ConfigDiagnostic, Severity};
pub use error::ConfigParseError;
pub use literal_locator::{find_literal_occurrences, ByteSpan};
pub use model::{
    ConfigDocument, FilePattern, Include, IncludeReference, ParsedConfig, ProjectDef,
};
pub use parser::parse_config;

/// Recognized configuration filenames, in priority order (§4.4, §6): a
/// directory is checked for `.artic-lsp` before `artic.json`.
pub const CONFIG_FILE_NAMES: &[&str] = &[".artic-lsp", "artic.json"];

/// Current on-disk schema version (§4.2, §6).
pub const CURRENT_VERSION: &str = "2.0";

/// The last version accepted with only a deprecation warning (§4.2).
pub const DEPRECATED_VERSION: &str = "1.0";
