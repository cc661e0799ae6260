// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The single-threaded message loop (§5): one blocking read, one
//! dispatch, one (or more) writes, repeat. No suspension points inside a
//! handler — this is what makes the trigger-matrix ordering guarantees of
//! §4.5 hold.

use std::io::{BufRead, Write};

use serde_json::Value;

use artic_compiler_frontend::CompileFrontend;

use crate::error::TransportError;
use crate::handlers;
use crate::orchestrator::Orchestrator;
use crate::protocol::{error_response, response, IncomingMessage};
use crate::transport::{read_message, write_message};

pub struct LspServer<F: CompileFrontend> {
    orchestrator: Orchestrator<F>,
    running: bool,
}

impl<F: CompileFrontend> LspServer<F> {
    pub fn new(orchestrator: Orchestrator<F>) -> Self {
        Self {
            orchestrator,
            running: true,
        }
    }

    /// Runs the loop to completion. Returns the process exit code (§6
    /// "Exit codes"): 0 on a clean `shutdown`, 1 if the transport itself
    /// fails (§7 "Fatal").
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> i32 {
        loop {
            if !self.running {
                return 0;
            }
            let message = match read_message(input) {
                Ok(Some(message)) => message,
                Ok(None) => return 0,
                Err(error) => {
                    tracing::error!(%error, "fatal transport error, exiting");
                    return 1;
                }
            };
            if let Err(error) = self.dispatch(message, output) {
                tracing::error!(%error, "fatal transport error while responding, exiting");
                return 1;
            }
        }
    }

    fn dispatch(&mut self, raw: Value, output: &mut impl Write) -> Result<(), TransportError> {
        let Some(message) = IncomingMessage::parse(raw) else {
            tracing::debug!("dropping malformed message with no method");
            return Ok(());
        };

        tracing::debug!(method = %message.method, is_request = message.is_request(), "dispatching");
        let (result, notifications) =
            handlers::handle(&mut self.orchestrator, &mut self.running, &message.method, message.params);

        if let Some(id) = message.id {
            let envelope = match result {
                Ok(value) => response(id, value),
                Err(error) => error_response(id, &error),
            };
            write_message(output, &envelope)?;
        } else if let Err(error) = result {
            tracing::warn!(method = %message.method, message = %error.message, "notification handler reported an error");
        }

        for notification in notifications {
            write_message(output, &notification)?;
        }
        Ok(())
    }
}
