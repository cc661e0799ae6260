// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Parses one configuration document (§4.2).
//!
//! Parsing runs in two passes over the same `serde_json::Value` (§4.2
//! `[AMBIENT]`): unknown-key detection walks the raw JSON object directly,
//! since `serde`'s default behavior is to silently ignore fields it
//! doesn't recognize, while everything else is pulled straight out of the
//! `Value` rather than through a typed deserialize — the raw JSON text
//! itself is retained nowhere past this function, only the literals needed
//! for later diagnostic tagging (§4.2.1).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::diagnostic::ConfigDiagnostic;
use crate::error::ConfigParseError;
use crate::model::{ConfigDocument, FilePattern, Include, IncludeReference, ParsedConfig, ProjectDef};
use crate::schema::{PROJECT_KEYS, TOP_LEVEL_KEYS};

/// Parses the document at `path`. `optional` comes from the include that
/// referenced this document (or `false` for the workspace root): when the
/// document is missing and the include was optional, no diagnostic is
/// raised — the caller is expected to silently skip it (§4.2, §4.4 step 2).
pub fn parse_config(
    path: &Path,
    optional: bool,
    log: &mut Vec<ConfigDiagnostic>,
) -> Result<ParsedConfig, ConfigParseError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) => {
            if !(optional && source.kind() == std::io::ErrorKind::NotFound) {
                log.push(ConfigDiagnostic::error(
                    format!("could not read config document: {source}"),
                    path.to_path_buf(),
                ));
            }
            return Err(ConfigParseError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(source) => {
            log.push(ConfigDiagnostic::error(
                format!("{} is not valid JSON: {source}", path.display()),
                path.to_path_buf(),
            ));
            return Err(ConfigParseError::Json {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            log.push(ConfigDiagnostic::error(
                format!("{} must contain a JSON object", path.display()),
                path.to_path_buf(),
            ));
            return Err(ConfigParseError::NotAnObject(path.to_path_buf()));
        }
    };

    for key in obj.keys() {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            log.push(
                ConfigDiagnostic::error(format!("unknown configuration key `{key}`"), path.to_path_buf())
                    .with_literal(key.clone()),
            );
        }
    }

    let doc_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    let version = parse_version(obj.get("artic-config"), path, log);

    let mut declared_projects = Vec::new();
    let mut projects = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    if let Some(entries) = obj.get("projects").and_then(Value::as_array) {
        for entry in entries {
            if let Some(def) = parse_project_entry(entry, path, &doc_dir, log) {
                register_project(def, &mut seen_names, &mut declared_projects, &mut projects, path, log);
            }
        }
    }

    let mut default_project = None;
    if let Some(raw) = obj.get("default-project") {
        match raw {
            Value::String(name) => default_project = Some(name.clone()),
            Value::Object(_) => {
                if let Some(def) = parse_project_entry(raw, path, &doc_dir, log) {
                    default_project = Some(def.name.clone());
                    register_project(def, &mut seen_names, &mut declared_projects, &mut projects, path, log);
                }
            }
            _ => log.push(ConfigDiagnostic::error(
                "\"default-project\" must be a string or a project object",
                path.to_path_buf(),
            )),
        }
    }

    let mut includes = Vec::new();
    if let Some(entries) = obj.get("include").and_then(Value::as_array) {
        for entry in entries {
            match entry.as_str() {
                Some(raw) => includes.push(parse_include(raw, &doc_dir, path, log)),
                None => log.push(ConfigDiagnostic::error(
                    "`include` entries must be strings",
                    path.to_path_buf(),
                )),
            }
        }
    }

    Ok(ParsedConfig {
        document: ConfigDocument {
            path: path.to_path_buf(),
            version,
            declared_projects,
            default_project,
            includes,
        },
        projects,
    })
}

fn parse_version(raw: Option<&Value>, path: &Path, log: &mut Vec<ConfigDiagnostic>) -> String {
    match raw.and_then(Value::as_str) {
        Some("1.0") => {
            log.push(
                ConfigDiagnostic::warning(
                    "\"artic-config\": \"1.0\" is deprecated, migrate to \"2.0\"",
                    path.to_path_buf(),
                )
                .with_literal("1.0"),
            );
            "1.0".to_string()
        }
        Some("2.0") => "2.0".to_string(),
        Some(other) => {
            log.push(
                ConfigDiagnostic::warning(
                    format!("unrecognized \"artic-config\" version `{other}`; treating this document as 2.0"),
                    path.to_path_buf(),
                )
                .with_literal(other.to_string()),
            );
            "2.0".to_string()
        }
        None => {
            log.push(ConfigDiagnostic::error(
                "missing required key \"artic-config\"",
                path.to_path_buf(),
            ));
            "2.0".to_string()
        }
    }
}

fn register_project(
    def: ProjectDef,
    seen_names: &mut HashSet<String>,
    declared_projects: &mut Vec<String>,
    projects: &mut Vec<ProjectDef>,
    path: &Path,
    log: &mut Vec<ConfigDiagnostic>,
) {
    if !seen_names.insert(def.name.clone()) {
        log.push(
            ConfigDiagnostic::warning(
                format!("duplicate project name `{}` within the same document; keeping the first definition", def.name),
                path.to_path_buf(),
            )
            .with_literal(def.name),
        );
        return;
    }
    declared_projects.push(def.name.clone());
    projects.push(def);
}

fn parse_project_entry(
    value: &Value,
    doc_path: &Path,
    doc_dir: &Path,
    log: &mut Vec<ConfigDiagnostic>,
) -> Option<ProjectDef> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            log.push(ConfigDiagnostic::error(
                "project entry must be a JSON object",
                doc_path.to_path_buf(),
            ));
            return None;
        }
    };

    for key in obj.keys() {
        if !PROJECT_KEYS.contains(&key.as_str()) {
            log.push(
                ConfigDiagnostic::error(format!("unknown project key `{key}`"), doc_path.to_path_buf())
                    .with_literal(key.clone()),
            );
        }
    }

    let name = match obj.get("name").and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            log.push(ConfigDiagnostic::error(
                "project entry is missing required key \"name\"",
                doc_path.to_path_buf(),
            ));
            return None;
        }
    };

    let root = match obj.get("folder").and_then(Value::as_str) {
        Some(folder) => {
            let resolved = resolve_path(folder, doc_dir);
            if resolved.is_dir() {
                resolved
            } else {
                log.push(
                    ConfigDiagnostic::warning(
                        format!(
                            "project `{name}`'s folder `{folder}` does not exist; falling back to the document's directory"
                        ),
                        doc_path.to_path_buf(),
                    )
                    .with_literal(folder.to_string()),
                );
                doc_dir.to_path_buf()
            }
        }
        None => doc_dir.to_path_buf(),
    };

    let dependencies = obj
        .get("dependencies")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    let patterns = obj
        .get("files")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).map(FilePattern::parse).collect())
        .unwrap_or_default();

    Some(ProjectDef {
        name,
        origin: doc_path.to_path_buf(),
        root,
        patterns,
        dependencies,
    })
}

fn parse_include(
    raw: &str,
    doc_dir: &Path,
    doc_path: &Path,
    log: &mut Vec<ConfigDiagnostic>,
) -> IncludeReference {
    if raw == "<global>" {
        log.push(
            ConfigDiagnostic::warning(
                "`<global>` includes are deprecated and are never expanded",
                doc_path.to_path_buf(),
            )
            .with_literal(raw.to_string()),
        );
        return IncludeReference {
            kind: Include::DeprecatedGlobal,
            literal: raw.to_string(),
        };
    }

    let (optional, path_part) = match raw.strip_suffix('?') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let resolved = resolve_path(path_part, doc_dir);
    let kind = if optional {
        Include::OptionalPath(resolved)
    } else {
        Include::Path(resolved)
    };
    IncludeReference {
        kind,
        literal: raw.to_string(),
    }
}

/// Resolves a raw path string against a document's directory, honoring the
/// `~/`, absolute, and relative forms shared with the glob pattern grammar
/// (§4.2), then lexically normalizes the result.
fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    let resolved = if let Some(rest) = raw.strip_prefix("~/") {
        match artic_glob::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from("/").join(rest),
        }
    } else if raw == "~" {
        artic_glob::home_dir().unwrap_or_else(|| PathBuf::from("/"))
    } else {
        let candidate = PathBuf::from(raw);
        if candidate.is_absolute() {
            candidate
        } else {
            base.join(candidate)
        }
    };
    artic_glob::weak_canonicalize(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use std::io::Write;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_minimal_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{"artic-config": "2.0"}"#,
        );
        let mut log = Vec::new();
        let parsed = parse_config(&path, false, &mut log).unwrap();
        assert_eq!(parsed.document.version, "2.0");
        assert!(log.is_empty());
    }

    #[test]
    fn warns_on_deprecated_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "artic.json", r#"{"artic-config": "1.0"}"#);
        let mut log = Vec::new();
        parse_config(&path, false, &mut log).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].severity, Severity::Warning);
    }

    #[test]
    fn unknown_top_level_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{"artic-config": "2.0", "bogus": true}"#,
        );
        let mut log = Vec::new();
        parse_config(&path, false, &mut log).unwrap();
        assert!(log.iter().any(|d| d.severity == Severity::Error && d.literal_context.as_deref() == Some("bogus")));
    }

    #[test]
    fn parses_projects_and_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{
                "artic-config": "2.0",
                "projects": [
                    {"name": "app", "dependencies": ["lib"], "files": ["**/*.art", "!**/test_*.art"]},
                    {"name": "lib", "files": ["lib/**/*.art"]}
                ],
                "default-project": "app"
            }"#,
        );
        let mut log = Vec::new();
        let parsed = parse_config(&path, false, &mut log).unwrap();
        assert_eq!(parsed.projects.len(), 2);
        assert_eq!(parsed.document.default_project.as_deref(), Some("app"));
        assert_eq!(parsed.projects[0].dependencies, vec!["lib".to_string()]);
        assert!(matches!(parsed.projects[0].patterns[1], FilePattern::Exclude(_)));
    }

    #[test]
    fn duplicate_project_name_keeps_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{"artic-config": "2.0", "projects": [
                {"name": "a", "files": ["x.art"]},
                {"name": "a", "files": ["y.art"]}
            ]}"#,
        );
        let mut log = Vec::new();
        let parsed = parse_config(&path, false, &mut log).unwrap();
        assert_eq!(parsed.projects.len(), 1);
        assert_eq!(parsed.projects[0].patterns[0].pattern(), "x.art");
        assert!(log.iter().any(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn include_grammar_distinguishes_optional_and_global() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{"artic-config": "2.0", "include": ["other.json", "missing.json?", "<global>"]}"#,
        );
        let mut log = Vec::new();
        let parsed = parse_config(&path, false, &mut log).unwrap();
        assert_eq!(parsed.document.includes.len(), 3);
        assert!(matches!(parsed.document.includes[0].kind, Include::Path(_)));
        assert!(matches!(parsed.document.includes[1].kind, Include::OptionalPath(_)));
        assert!(matches!(parsed.document.includes[2].kind, Include::DeprecatedGlobal));
        assert!(log.iter().any(|d| d.literal_context.as_deref() == Some("<global>")));
    }

    #[test]
    fn missing_optional_document_produces_no_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let mut log = Vec::new();
        let err = parse_config(&path, true, &mut log).unwrap_err();
        assert!(matches!(err, ConfigParseError::Io { .. }));
        assert!(log.is_empty());
    }

    #[test]
    fn missing_required_document_produces_a_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let mut log = Vec::new();
        parse_config(&path, false, &mut log).unwrap_err();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn bad_json_produces_a_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "artic.json", "not json");
        let mut log = Vec::new();
        let err = parse_config(&path, false, &mut log).unwrap_err();
        assert!(matches!(err, ConfigParseError::Json { .. }));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn nonexistent_folder_falls_back_to_document_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "artic.json",
            r#"{"artic-config": "2.0", "projects": [{"name": "a", "folder": "does-not-exist"}]}"#,
        );
        let mut log = Vec::new();
        let parsed = parse_config(&path, false, &mut log).unwrap();
        assert_eq!(parsed.projects[0].root, dir.path());
        assert!(log.iter().any(|d| d.severity == Severity::Warning));
    }
}
