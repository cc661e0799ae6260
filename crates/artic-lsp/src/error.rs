// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use thiserror::Error;

/// Errors the orchestrator and transport layer can raise (§7 "Error kinds").
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A request referenced a file outside `.art`/`.impala` for a
    /// source-only feature. Maps to LSP `InvalidParams`.
    #[error("`{0}` is not a recognized Artic source file")]
    NotASourceFile(String),

    /// Internal inconsistency — e.g. ensure-compile could not produce a
    /// result. Maps to LSP `InternalError`.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Fatal, orchestrator-level failures (§7 "Fatal"): I/O failure on the
/// transport. These exit the process with code 1 rather than becoming an
/// LSP error response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error reading the LSP message stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed LSP frame: {0}")]
    Framing(String),

    #[error("malformed JSON-RPC payload: {0}")]
    Json(#[from] serde_json::Error),
}
