// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::path::PathBuf;

use thiserror::Error;

/// Failure modes that stop parsing of a configuration document outright.
///
/// Most problems with a config document are [`ConfigDiagnostic`]s, not
/// errors — a malformed `dependencies` entry doesn't stop the rest of the
/// document from loading. This enum is reserved for the handful of cases
/// where there is nothing left to parse.
///
/// [`ConfigDiagnostic`]: crate::diagnostic::ConfigDiagnostic
#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("could not read config document at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config document at {0} is not a JSON object")]
    NotAnObject(PathBuf),
}
