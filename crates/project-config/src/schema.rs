// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Known keys of the on-disk JSON schema (§4.2), used for unknown-key
//! detection against the raw [`serde_json::Value`] in `parser.rs` — the
//! parser walks the object directly rather than through a typed
//! deserialize, since `serde`'s default behavior is to silently ignore
//! fields it doesn't recognize.

/// Known top-level keys, for unknown-key detection against the raw object.
pub const TOP_LEVEL_KEYS: &[&str] = &["artic-config", "projects", "default-project", "include"];

/// Known project-object keys, for unknown-key detection against the raw
/// object of each entry in `projects` (and an inline `default-project`).
pub const PROJECT_KEYS: &[&str] = &["name", "folder", "dependencies", "files"];
