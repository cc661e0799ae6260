// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Entry point: installs the crash handler, wires stderr-only logging,
//! then runs the synchronous message loop over stdio.
//!
//! Logging is stderr-only and unconditional — unlike the teacher's
//! tower-lsp binary, there's no TCP mode here to make stdout safe to use
//! for anything else, so stdout is reserved for JSON-RPC from the first
//! line of `main`.

use std::io::{self, BufReader};

use artic_compiler_frontend::ReferenceFrontend;
use artic_lsp::{signal, LspServer, Orchestrator};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("ARTIC_LSP_LOG").unwrap_or_else(|_| "artic_lsp=info,artic_workspace=info".to_string()),
        )
        .with_writer(io::stderr)
        .init();

    signal::install();

    tracing::info!("artic-lsp starting up");

    let orchestrator = Orchestrator::new(ReferenceFrontend::new());
    let mut server = LspServer::new(orchestrator);

    let stdin = io::stdin();
    let mut input = BufReader::new(stdin.lock());
    let mut output = io::stdout();

    let exit_code = server.run(&mut input, &mut output);
    tracing::info!(exit_code, "artic-lsp exiting");
    std::process::exit(exit_code);
}
