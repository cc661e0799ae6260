// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use thiserror::Error;

/// Internal invariant violations of the arena (§3 "Ownership"). These are
/// never surfaced to the user as diagnostics — per §7's propagation
/// policy, user-facing problems (duplicate project names, missing
/// includes) are `ConfigDiagnostic`s produced by the caller, not `Err`s
/// from this crate. This type exists purely to catch programmer error:
/// using a handle from a stale generation, or double-registering a name
/// the caller was supposed to have already checked.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("project name `{0}` is already registered in this arena generation")]
    DuplicateProject(String),

    #[error("handle is from a stale arena generation (reload happened since it was issued)")]
    StaleHandle,

    #[error("no project named `{0}` is registered")]
    UnknownProject(String),
}
