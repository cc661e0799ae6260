// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Diagnostics emitted by the glob expander.
//!
//! The expander never fails outright (§4.1 of the spec): a nonexistent root
//! becomes an error diagnostic plus an empty result, and resource bounds
//! being hit become warnings. Callers decide what, if anything, to surface
//! to the user.

/// Severity of a diagnostic produced while expanding a single pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic produced while expanding one glob pattern.
///
/// `tag` identifies what triggered the diagnostic (the pattern itself, or
/// the specific segment that hit a bound) so the caller can attach it to a
/// literal-context search without re-deriving it.
#[derive(Debug, Clone)]
pub struct GlobDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub tag: String,
}

impl GlobDiagnostic {
    pub fn error(message: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            tag: tag.into(),
        }
    }

    pub fn warning(message: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            tag: tag.into(),
        }
    }
}

/// Somewhere to send diagnostics produced while expanding a pattern.
///
/// `Vec<GlobDiagnostic>` is the usual sink; callers that want to route
/// diagnostics elsewhere (logging, a shared collector) can implement this
/// directly instead of collecting into a vec first.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: GlobDiagnostic);
}

impl DiagnosticSink for Vec<GlobDiagnostic> {
    fn report(&mut self, diagnostic: GlobDiagnostic) {
        self.push(diagnostic);
    }
}
