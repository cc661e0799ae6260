// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::types::{CompileOutcome, CompileRequest};

/// The contract between the workspace orchestrator and the artic/impala
/// lexer, parser, name binder, and type checker (§1 "Out of scope").
///
/// The orchestrator calls this with a prepared, ordered file set and
/// consumes the resulting diagnostics and symbol map; it has no opinion on
/// how compilation actually happens. `artic-lsp` is built against this
/// trait rather than a concrete frontend so that a real grammar can be
/// substituted without touching the orchestrator.
pub trait CompileFrontend {
    fn compile(&self, request: &CompileRequest) -> CompileOutcome;
}
