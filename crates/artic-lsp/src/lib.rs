// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Compile orchestrator and LSP adapter (§4.5, §4.6): the layer that ties
//! the workspace resolver to a running language-server process.

mod compilation_result;
mod coords;
mod diagnostics;
mod error;
mod handlers;
mod orchestrator;
mod protocol;
pub mod signal;
mod transport;

pub mod server;

pub use compilation_result::CompilationResult;
pub use error::{OrchestratorError, TransportError};
pub use orchestrator::{BuildReport, Orchestrator, RequestKind};
pub use server::LspServer;
