// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Minimal JSON-RPC 2.0 envelope helpers: just enough to dispatch the LSP
//! methods §4.6 lists, without pulling in a full JSON-RPC framework (the
//! teacher's `tower-lsp` dependency did this for free; the synchronous
//! transport of §5 replaces it with these few functions).

use serde_json::{json, Value};

use crate::error::OrchestratorError;

/// One incoming JSON-RPC message, already split into its useful parts.
/// `id` is `None` for notifications.
pub struct IncomingMessage {
    pub id: Option<Value>,
    pub method: String,
    pub params: Value,
}

impl IncomingMessage {
    pub fn parse(raw: Value) -> Option<Self> {
        let method = raw.get("method")?.as_str()?.to_string();
        let id = raw.get("id").cloned();
        let params = raw.get("params").cloned().unwrap_or(Value::Null);
        Some(Self { id, method, params })
    }

    pub fn is_request(&self) -> bool {
        self.id.is_some()
    }
}

/// A JSON-RPC error response body (§7 "Request-error").
#[derive(Debug, Clone)]
pub struct LspError {
    pub code: i64,
    pub message: String,
}

impl LspError {
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: Self::INVALID_PARAMS,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: Self::INTERNAL_ERROR,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({"code": self.code, "message": self.message})
    }
}

impl From<OrchestratorError> for LspError {
    fn from(error: OrchestratorError) -> Self {
        match error {
            OrchestratorError::NotASourceFile(_) => LspError::invalid_params(error.to_string()),
            OrchestratorError::Internal(_) => LspError::internal(error.to_string()),
        }
    }
}

pub fn response(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

pub fn error_response(id: Value, error: &LspError) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": error.to_json()})
}

pub fn notification(method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "method": method, "params": params})
}
