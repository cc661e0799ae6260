// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Glob pattern expansion for Artic project file lists.
//!
//! A pattern is expanded against a root directory into a deduplicated,
//! first-seen-ordered list of absolute regular-file paths. The expander
//! owns no state: every call is independent, which makes it safe to call
//! from any number of project materializations without coordination.

mod diagnostic;
mod expand;
mod path_util;
mod pattern;

pub use diagnostic::{DiagnosticSink, GlobDiagnostic, Severity};
pub use expand::{expand, MAX_DIRS_UNDER_DOUBLE_STAR, MAX_ENTRIES_PER_WILDCARD};
pub use path_util::{home_dir, weak_canonicalize};
pub use pattern::{fnmatch, Anchor};
