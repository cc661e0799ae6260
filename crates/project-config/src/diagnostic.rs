// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::path::PathBuf;

/// Severity of a configuration diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A diagnostic produced while loading or using a configuration document.
///
/// `literal_context`, when present, is the exact quoted JSON string token
/// the diagnostic concerns (e.g. a duplicate project's `"name"` value, or
/// an unresolved dependency literal). The LSP adapter later re-scans the
/// document's text for occurrences of that literal to produce ranges
/// (§4.5, §4.2.1) — this crate never computes byte offsets itself.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub file: PathBuf,
    pub literal_context: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, file: PathBuf) -> Self {
        Self {
            severity,
            message: message.into(),
            file,
            literal_context: None,
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal_context = Some(literal.into());
        self
    }

    pub fn error(message: impl Into<String>, file: PathBuf) -> Self {
        Self::new(Severity::Error, message, file)
    }

    pub fn warning(message: impl Into<String>, file: PathBuf) -> Self {
        Self::new(Severity::Warning, message, file)
    }
}
