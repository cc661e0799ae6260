// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Stateless handler functions, one per LSP method (§4.6). Each takes the
//! orchestrator and the request's raw `params`, returns the JSON-RPC
//! result (or error) plus any notifications (diagnostic publications)
//! that must go out alongside it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lsp_types::{
    CompletionOptions, OneOf, PublishDiagnosticsParams, RenameOptions, SemanticTokenModifier,
    SemanticTokenType, SemanticTokensFullOptions, SemanticTokensLegend, SemanticTokensOptions,
    SemanticTokensServerCapabilities, ServerCapabilities, ServerInfo, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use serde_json::{json, Value};

use artic_compiler_frontend::{CompileFrontend, Symbol, SymbolKind as DeclKind};

use crate::coords::to_lsp_position;
use crate::diagnostics::{compile_diagnostics_to_lsp, config_diagnostics_to_lsp};
use crate::orchestrator::{Orchestrator, RequestKind};
use crate::protocol::{notification, LspError};

const SOURCE_EXTENSIONS: &[&str] = &["art", "impala"];

/// Dispatches one method to its handler. Returns the JSON-RPC result (used
/// only when the incoming message was a request, i.e. carried an `id`) and
/// a list of additional notifications to send right after it — almost
/// always `textDocument/publishDiagnostics`.
pub fn handle<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    running: &mut bool,
    method: &str,
    params: Value,
) -> (Result<Value, LspError>, Vec<Value>) {
    let mut notifications = Vec::new();
    let result = dispatch(orchestrator, running, method, params, &mut notifications);
    (result, notifications)
}

fn dispatch<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    running: &mut bool,
    method: &str,
    params: Value,
    notifications: &mut Vec<Value>,
) -> Result<Value, LspError> {
    match method {
        "initialize" => handle_initialize(orchestrator, &params),
        "initialized" => Ok(Value::Null),
        "shutdown" => {
            tracing::info!("shutdown requested");
            *running = false;
            Ok(Value::Null)
        }
        "exit" => {
            *running = false;
            Ok(Value::Null)
        }
        "textDocument/didOpen" => handle_did_open(orchestrator, &params, notifications),
        "textDocument/didChange" => handle_did_change(orchestrator, &params, notifications),
        "textDocument/didSave" => handle_did_save(orchestrator, &params, notifications),
        "textDocument/didClose" => handle_did_close(orchestrator, &params),
        "workspace/didChangeConfiguration" => Ok(Value::Null),
        "workspace/didChangeWatchedFiles" => {
            handle_did_change_watched_files(orchestrator, &params, notifications)
        }
        "textDocument/definition" => {
            handle_symbol_lookup(orchestrator, &params, RequestKind::Definition, definition_response)
        }
        "textDocument/references" => {
            handle_symbol_lookup(orchestrator, &params, RequestKind::References, references_response)
        }
        "textDocument/prepareRename" => {
            handle_symbol_lookup(orchestrator, &params, RequestKind::Rename, prepare_rename_response)
        }
        "textDocument/rename" => handle_rename(orchestrator, &params),
        "textDocument/completion" => {
            handle_symbol_lookup(orchestrator, &params, RequestKind::Completion, completion_response)
        }
        "textDocument/semanticTokens/full" => handle_semantic_tokens_full(orchestrator, &params),
        "textDocument/semanticTokens/range" => handle_semantic_tokens_range(orchestrator, &params),
        "textDocument/inlayHint" => handle_inlay_hint(orchestrator, &params),
        "artic/debugAst" => {
            handle_symbol_lookup(orchestrator, &params, RequestKind::DebugAst, debug_ast_response)
        }
        other => {
            tracing::debug!(method = other, "unhandled LSP method, ignoring");
            Ok(Value::Null)
        }
    }
}

// ---- URI / path helpers ------------------------------------------------

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| artic_project_config::CONFIG_FILE_NAMES.contains(&name))
}

fn uri_to_path(uri: &Url) -> Result<PathBuf, LspError> {
    uri.to_file_path()
        .map_err(|_| LspError::invalid_params(format!("not a file URI: {uri}")))
}

fn path_to_uri(path: &Path) -> Url {
    Url::from_file_path(path).unwrap_or_else(|_| Url::parse("file:///invalid").expect("valid fallback"))
}

fn text_document_uri(params: &Value) -> Result<Url, LspError> {
    params
        .pointer("/textDocument/uri")
        .and_then(Value::as_str)
        .ok_or_else(|| LspError::invalid_params("missing textDocument.uri"))?
        .parse()
        .map_err(|_| LspError::invalid_params("malformed textDocument.uri"))
}

// ---- Diagnostic publication --------------------------------------------

fn publish_compile_diagnostics(
    compile_set: &[PathBuf],
    diagnostics: &HashMap<PathBuf, Vec<artic_compiler_frontend::CompileDiagnostic>>,
    out: &mut Vec<Value>,
) {
    for file in compile_set {
        let lsp_diagnostics = diagnostics
            .get(file)
            .map(|d| compile_diagnostics_to_lsp(d))
            .unwrap_or_default();
        push_publish(file, lsp_diagnostics, out);
    }
}

fn publish_config_diagnostics<F: CompileFrontend>(orchestrator: &Orchestrator<F>, out: &mut Vec<Value>) {
    let grouped = config_diagnostics_to_lsp(orchestrator.config_diagnostics());
    for (file, diagnostics) in grouped {
        push_publish(&file, diagnostics, out);
    }
}

fn push_publish(file: &Path, diagnostics: Vec<lsp_types::Diagnostic>, out: &mut Vec<Value>) {
    let params = PublishDiagnosticsParams {
        uri: path_to_uri(file),
        diagnostics,
        version: None,
    };
    let Ok(value) = serde_json::to_value(params) else {
        return;
    };
    out.push(notification("textDocument/publishDiagnostics", value));
}

// ---- initialize ---------------------------------------------------------

fn handle_initialize<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let restart_from_crash = params
        .get("initializationOptions")
        .and_then(|opts| opts.get("restartFromCrash"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if restart_from_crash {
        tracing::warn!("session started after a crash, enabling safe mode for the first compile");
        orchestrator.enable_safe_mode();
    }

    let result = lsp_types::InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(ServerInfo {
            name: "artic-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    };
    serde_json::to_value(result).map_err(|e| LspError::internal(e.to_string()))
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        definition_provider: Some(OneOf::Left(true)),
        references_provider: Some(OneOf::Left(true)),
        rename_provider: Some(OneOf::Right(RenameOptions {
            prepare_provider: Some(true),
            work_done_progress_options: WorkDoneProgressOptions::default(),
        })),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(false),
            trigger_characters: Some(vec![".".to_string(), ":".to_string()]),
            all_commit_characters: None,
            work_done_progress_options: WorkDoneProgressOptions::default(),
            completion_item: None,
        }),
        semantic_tokens_provider: Some(SemanticTokensServerCapabilities::SemanticTokensOptions(
            SemanticTokensOptions {
                work_done_progress_options: WorkDoneProgressOptions::default(),
                legend: semantic_tokens_legend(),
                range: Some(true),
                full: Some(SemanticTokensFullOptions::Bool(true)),
            },
        )),
        inlay_hint_provider: Some(OneOf::Left(true)),
        ..ServerCapabilities::default()
    }
}

fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: vec![SemanticTokenType::FUNCTION, SemanticTokenType::VARIABLE],
        token_modifiers: vec![SemanticTokenModifier::DECLARATION],
    }
}

fn token_type_index(kind: DeclKind) -> u32 {
    match kind {
        DeclKind::Function => 0,
        DeclKind::Binding => 1,
    }
}

// ---- textDocument/did* --------------------------------------------------

fn handle_did_open<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    params: &Value,
    notifications: &mut Vec<Value>,
) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    let text = params
        .pointer("/textDocument/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if is_source_file(&path) {
        if let Some(report) = orchestrator.on_source_opened(&path, text) {
            publish_compile_diagnostics(&report.compile_set, &report.diagnostics, notifications);
            publish_config_diagnostics(orchestrator, notifications);
        }
    } else if is_config_file(&path) {
        orchestrator.on_config_opened();
        publish_config_diagnostics(orchestrator, notifications);
    }
    Ok(Value::Null)
}

fn handle_did_change<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    params: &Value,
    notifications: &mut Vec<Value>,
) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    let text = params
        .pointer("/contentChanges/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if is_source_file(&path) {
        let report = orchestrator.on_source_changed(&path, text);
        publish_compile_diagnostics(&report.compile_set, &report.diagnostics, notifications);
        publish_config_diagnostics(orchestrator, notifications);
    } else if is_config_file(&path) {
        orchestrator.on_config_opened();
        publish_config_diagnostics(orchestrator, notifications);
    }
    Ok(Value::Null)
}

fn handle_did_save<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    params: &Value,
    notifications: &mut Vec<Value>,
) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;

    if is_source_file(&path) {
        orchestrator.on_source_saved(&path);
    } else if is_config_file(&path) && orchestrator.on_config_saved(&path) {
        publish_config_diagnostics(orchestrator, notifications);
    }
    Ok(Value::Null)
}

fn handle_did_close<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    if is_source_file(&path) {
        orchestrator.on_source_closed(&path);
    }
    Ok(Value::Null)
}

fn handle_did_change_watched_files<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    params: &Value,
    notifications: &mut Vec<Value>,
) -> Result<Value, LspError> {
    let changes = params.pointer("/changes").and_then(Value::as_array).cloned().unwrap_or_default();
    let mut reloaded = false;
    for change in &changes {
        let Some(uri) = change.get("uri").and_then(Value::as_str).and_then(|s| s.parse::<Url>().ok()) else {
            continue;
        };
        let Ok(path) = uri_to_path(&uri) else { continue };
        if is_config_file(&path) {
            orchestrator.on_watched_config_event(&path);
            reloaded = true;
        }
    }
    if reloaded {
        publish_config_diagnostics(orchestrator, notifications);
    }
    Ok(Value::Null)
}

// ---- Symbol-lookup requests ---------------------------------------------

/// Shared plumbing for the request-kind lookups of §4.5's trigger matrix:
/// validates the target is a source file, ensures compilation, then hands
/// off to `build_response` for the feature-specific shape.
fn handle_symbol_lookup<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    params: &Value,
    kind: RequestKind,
    build_response: impl FnOnce(&artic_lsp_result::Lookup) -> Value,
) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    if !is_source_file(&path) {
        return Err(crate::error::OrchestratorError::NotASourceFile(path.display().to_string()).into());
    }
    let position: lsp_types::Position = serde_json::from_value(
        params.get("position").cloned().ok_or_else(|| LspError::invalid_params("missing position"))?,
    )
    .map_err(|e| LspError::invalid_params(e.to_string()))?;

    let result = orchestrator.ensure_compiled(&path, kind);
    let Some(result) = result else {
        return Ok(build_response(&artic_lsp_result::Lookup::empty(path, position)));
    };

    let text = std::fs::read_to_string(&path).unwrap_or_default();
    let word = word_at_position(&text, position);
    let lookup = artic_lsp_result::Lookup {
        path,
        position,
        word,
        symbols: result.symbols.clone(),
    };
    Ok(build_response(&lookup))
}

fn word_at_position(text: &str, position: lsp_types::Position) -> Option<String> {
    let line = text.lines().nth(position.line as usize)?;
    let chars: Vec<char> = line.chars().collect();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut index = (position.character as usize).min(chars.len());

    if index >= chars.len() || !is_word(chars[index]) {
        if index > 0 && is_word(chars[index - 1]) {
            index -= 1;
        } else {
            return None;
        }
    }

    let mut start = index;
    while start > 0 && is_word(chars[start - 1]) {
        start -= 1;
    }
    let mut end = index;
    while end < chars.len() && is_word(chars[end]) {
        end += 1;
    }
    if start == end {
        return None;
    }
    Some(chars[start..end].iter().collect())
}

fn symbol_location(symbol: &Symbol) -> Value {
    let position = to_lsp_position(symbol.location);
    json!({
        "uri": path_to_uri(&symbol.file),
        "range": {"start": position, "end": position},
    })
}

fn definition_response(lookup: &artic_lsp_result::Lookup) -> Value {
    let Some(word) = &lookup.word else { return Value::Null };
    let matches = lookup.symbols.lookup(word);
    match matches.first() {
        Some(symbol) => symbol_location(symbol),
        None => Value::Null,
    }
}

fn references_response(lookup: &artic_lsp_result::Lookup) -> Value {
    let Some(word) = &lookup.word else { return Value::Array(Vec::new()) };
    Value::Array(lookup.symbols.lookup(word).iter().map(symbol_location).collect())
}

fn prepare_rename_response(lookup: &artic_lsp_result::Lookup) -> Value {
    let Some(word) = &lookup.word else { return Value::Null };
    if lookup.symbols.lookup(word).is_empty() {
        return Value::Null;
    }
    let line = lookup.position.line;
    // column bounds are approximate (byte/char position already resolved
    // by `word_at_position`); re-derive them from the word length.
    let start_char = lookup.position.character.saturating_sub(word.chars().count() as u32 / 2);
    json!({
        "range": {
            "start": {"line": line, "character": start_char},
            "end": {"line": line, "character": start_char + word.chars().count() as u32},
        },
        "placeholder": word,
    })
}

fn completion_response(lookup: &artic_lsp_result::Lookup) -> Value {
    let mut names: Vec<&str> = lookup.symbols.all().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    // CompletionItemKind::VARIABLE per the LSP spec's numeric enum (6).
    let items: Vec<Value> = names.into_iter().map(|name| json!({"label": name, "kind": 6})).collect();
    json!({"isIncomplete": false, "items": items})
}

fn debug_ast_response(lookup: &artic_lsp_result::Lookup) -> Value {
    let declared: Vec<&Symbol> = lookup.symbols.all().filter(|s| s.file == lookup.path).collect();
    Value::String(format!("{declared:#?}"))
}

/// `textDocument/rename`: a full request (not routed through
/// `handle_symbol_lookup`, since it needs `newName` as well as the
/// position) that replaces every declaration matching the word at the
/// cursor across the compile set — a textual rename, consistent with the
/// reference frontend only tracking declaration sites, not usages.
fn handle_rename<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    if !is_source_file(&path) {
        return Err(crate::error::OrchestratorError::NotASourceFile(path.display().to_string()).into());
    }
    let position: lsp_types::Position = serde_json::from_value(
        params.get("position").cloned().ok_or_else(|| LspError::invalid_params("missing position"))?,
    )
    .map_err(|e| LspError::invalid_params(e.to_string()))?;
    let new_name = params
        .get("newName")
        .and_then(Value::as_str)
        .ok_or_else(|| LspError::invalid_params("missing newName"))?
        .to_string();

    let Some(result) = orchestrator.ensure_compiled(&path, RequestKind::Rename) else {
        return Err(LspError::internal("no compilation result available for rename"));
    };

    let text = std::fs::read_to_string(&path).unwrap_or_default();
    let Some(old_name) = word_at_position(&text, position) else {
        return Ok(Value::Null);
    };

    let mut edits_by_file: HashMap<PathBuf, Vec<Value>> = HashMap::new();
    for symbol in result.symbols.lookup(&old_name) {
        let start = to_lsp_position(symbol.location);
        let end = lsp_types::Position {
            line: start.line,
            character: start.character + old_name.chars().count() as u32,
        };
        edits_by_file.entry(symbol.file.clone()).or_default().push(json!({
            "range": {"start": start, "end": end},
            "newText": new_name,
        }));
    }

    let mut changes = serde_json::Map::new();
    for (file, edits) in edits_by_file {
        changes.insert(path_to_uri(&file).to_string(), Value::Array(edits));
    }
    Ok(json!({"changes": changes}))
}

// ---- semantic tokens / inlay hints ---------------------------------------

fn handle_semantic_tokens_full<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    Ok(semantic_tokens_for(orchestrator, &path, None))
}

fn handle_semantic_tokens_range<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;
    let range: Option<lsp_types::Range> = params.get("range").cloned().and_then(|v| serde_json::from_value(v).ok());
    Ok(semantic_tokens_for(orchestrator, &path, range))
}

/// Per §4.5's trigger matrix, semantic tokens never trigger a compile:
/// `ensure_compiled` with `RequestKind::SemanticTokens` only reuses an
/// already-covering result, returning `None` otherwise.
fn semantic_tokens_for<F: CompileFrontend>(
    orchestrator: &mut Orchestrator<F>,
    path: &Path,
    range: Option<lsp_types::Range>,
) -> Value {
    let Some(result) = orchestrator.ensure_compiled(path, RequestKind::SemanticTokens) else {
        return json!({"data": []});
    };
    if !result.covers(path) {
        return json!({"data": []});
    }

    let mut symbols: Vec<&Symbol> = result.symbols.all().filter(|s| s.file == path).collect();
    symbols.sort_by_key(|s| (s.location.line, s.location.column));

    // The wire format is a flat array of u32 quintuples per token
    // (deltaLine, deltaStart, length, tokenType, tokenModifiers), §6
    // "Semantic-token encoding".
    let mut data: Vec<u32> = Vec::new();
    let mut previous_line = 0u32;
    let mut previous_start = 0u32;
    for symbol in symbols {
        let position = to_lsp_position(symbol.location);
        if let Some(range) = &range {
            if position.line < range.start.line || position.line > range.end.line {
                continue;
            }
        }
        let delta_line = position.line.saturating_sub(previous_line);
        let delta_start = if delta_line == 0 {
            position.character.saturating_sub(previous_start)
        } else {
            position.character
        };
        data.extend_from_slice(&[
            delta_line,
            delta_start,
            symbol.name.chars().count() as u32,
            token_type_index(symbol.kind),
            1u32,
        ]);
        previous_line = position.line;
        previous_start = position.character;
    }
    json!({"data": data})
}

fn handle_inlay_hint<F: CompileFrontend>(orchestrator: &mut Orchestrator<F>, params: &Value) -> Result<Value, LspError> {
    let uri = text_document_uri(params)?;
    let path = uri_to_path(&uri)?;

    // Never triggers a compile (§4.5 trigger matrix).
    let Some(result) = orchestrator.ensure_compiled(&path, RequestKind::InlayHints) else {
        return Ok(Value::Array(Vec::new()));
    };
    if !result.covers(&path) {
        return Ok(Value::Array(Vec::new()));
    }

    let hints: Vec<Value> = result
        .symbols
        .all()
        .filter(|s| s.file == path)
        .map(|symbol| {
            let position = to_lsp_position(symbol.location);
            let label = match symbol.kind {
                // The reference frontend has no type information (§1 "Out
                // of scope"); these are placeholder labels demonstrating
                // the feature's wiring, not real inferred types.
                DeclKind::Function => ": fn".to_string(),
                DeclKind::Binding => ": _".to_string(),
            };
            json!({
                "position": {"line": position.line, "character": position.character + symbol.name.chars().count() as u32},
                "label": label,
                "kind": 1,
                "paddingLeft": true,
            })
        })
        .collect();
    Ok(Value::Array(hints))
}

/// Small private module so `Lookup` doesn't leak into the crate's public
/// surface — it's purely a handler-internal bundle of "what the cursor is
/// on" for the request-kind dispatch above.
mod artic_lsp_result {
    use std::path::PathBuf;

    use artic_compiler_frontend::SymbolMap;

    pub struct Lookup {
        pub path: PathBuf,
        pub position: lsp_types::Position,
        pub word: Option<String>,
        pub symbols: SymbolMap,
    }

    impl Lookup {
        pub fn empty(path: PathBuf, position: lsp_types::Position) -> Self {
            Self {
                path,
                position,
                word: None,
                symbols: SymbolMap::new(),
            }
        }
    }
}
