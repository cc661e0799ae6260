// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The expansion algorithm itself: a bounded depth-first walk over the
//! filesystem driven by a parsed pattern's segments.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::diagnostic::{DiagnosticSink, GlobDiagnostic};
use crate::path_util::weak_canonicalize;
use crate::pattern::{self, Segment};

/// Directories explored under a single `**` segment before the expander
/// gives up on that branch and emits a warning.
pub const MAX_DIRS_UNDER_DOUBLE_STAR: usize = 20_000;

/// Directory entries read for a single wildcard segment before the
/// expander stops enumerating and emits a warning.
pub const MAX_ENTRIES_PER_WILDCARD: usize = 1_000;

/// Expands `pattern` against `project_root`, returning the matched paths in
/// first-seen order with duplicates removed (after weak canonicalization).
/// Diagnostics produced along the way are reported to `sink`.
///
/// This is a pure function: no shared state, nothing cached, safe to call
/// repeatedly and concurrently with different arguments.
pub fn expand(project_root: &Path, pattern: &str, sink: &mut dyn DiagnosticSink) -> Vec<PathBuf> {
    let parsed = pattern::parse(pattern);

    let root = match pattern::effective_root(parsed.anchor, project_root) {
        Some(root) => root,
        None => {
            sink.report(GlobDiagnostic::warning(
                "HOME is not set; pattern rooted at `~/` falls back to `/`",
                pattern,
            ));
            PathBuf::from("/")
        }
    };

    if !root.is_dir() {
        tracing::warn!(root = %root.display(), pattern, "glob root does not exist");
        sink.report(GlobDiagnostic::error(
            format!("pattern root `{}` does not exist", root.display()),
            pattern.to_string(),
        ));
        return Vec::new();
    }

    if parsed.segments.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut ctx = WalkCtx {
        sink,
        dirs_explored: 0,
        warned_dir_budget: false,
        pattern: pattern.to_string(),
    };

    walk(&root, &parsed.segments, 0, &mut out, &mut seen, &mut ctx);

    out
}

struct WalkCtx<'a> {
    sink: &'a mut dyn DiagnosticSink,
    dirs_explored: usize,
    warned_dir_budget: bool,
    pattern: String,
}

fn walk(
    base: &Path,
    segments: &[Segment],
    idx: usize,
    out: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
    ctx: &mut WalkCtx,
) {
    let is_last = idx == segments.len() - 1;

    match &segments[idx] {
        Segment::Literal(name) => {
            let candidate = base.join(name);
            if is_last {
                accept_if_file(&candidate, out, seen);
            } else if candidate.is_dir() {
                walk(&candidate, segments, idx + 1, out, seen, ctx);
            }
            // nonexistent literal segment: empty result, no diagnostic
        }
        Segment::Wildcard(raw) => {
            let entries = match read_sorted_dir(base) {
                Ok(entries) => entries,
                Err(err) => {
                    ctx.sink.report(GlobDiagnostic::warning(
                        format!("could not read `{}`: {}", base.display(), err),
                        ctx.pattern.clone(),
                    ));
                    return;
                }
            };

            let mut budget_warned = false;
            for (count, entry) in entries.iter().enumerate() {
                if count >= MAX_ENTRIES_PER_WILDCARD {
                    if !budget_warned {
                        tracing::warn!(
                            dir = %base.display(),
                            limit = MAX_ENTRIES_PER_WILDCARD,
                            "wildcard segment hit the per-directory entry bound"
                        );
                        ctx.sink.report(GlobDiagnostic::warning(
                            format!(
                                "directory `{}` has more than {} entries; \
                                 remaining entries were not considered",
                                base.display(),
                                MAX_ENTRIES_PER_WILDCARD
                            ),
                            ctx.pattern.clone(),
                        ));
                        budget_warned = true;
                    }
                    break;
                }
                let name = entry.file_name();
                let name = match name.to_str() {
                    Some(n) => n,
                    None => continue,
                };
                if !pattern::fnmatch(raw, name) {
                    continue;
                }
                let candidate = base.join(name);
                if is_last {
                    accept_if_file(&candidate, out, seen);
                } else if candidate.is_dir() {
                    walk(&candidate, segments, idx + 1, out, seen, ctx);
                }
            }
        }
        Segment::DoubleStar => {
            if ctx.warned_dir_budget {
                return;
            }
            ctx.dirs_explored += 1;
            if ctx.dirs_explored > MAX_DIRS_UNDER_DOUBLE_STAR {
                ctx.warned_dir_budget = true;
                tracing::warn!(
                    base = %base.display(),
                    limit = MAX_DIRS_UNDER_DOUBLE_STAR,
                    "`**` expansion hit the directory exploration bound"
                );
                ctx.sink.report(GlobDiagnostic::warning(
                    format!(
                        "`**` explored more than {} directories; \
                         the remaining subtree was not searched",
                        MAX_DIRS_UNDER_DOUBLE_STAR
                    ),
                    ctx.pattern.clone(),
                ));
                return;
            }

            // `**` matching zero directories: continue with the next segment
            // rooted here. As the final segment, `**` instead collects every
            // regular file under `base` itself (depth zero included).
            if !is_last {
                walk(base, segments, idx + 1, out, seen, ctx);
            }

            let entries = match read_sorted_dir(base) {
                Ok(entries) => entries,
                Err(err) => {
                    ctx.sink.report(GlobDiagnostic::warning(
                        format!("could not read `{}`: {}", base.display(), err),
                        ctx.pattern.clone(),
                    ));
                    return;
                }
            };

            for entry in entries {
                let candidate = base.join(entry.file_name());
                if candidate.is_dir() {
                    // descend, staying on the `**` segment so it can match
                    // further down too.
                    walk(&candidate, segments, idx, out, seen, ctx);
                } else if is_last {
                    accept_if_file(&candidate, out, seen);
                }
            }
        }
    }
}

fn accept_if_file(candidate: &Path, out: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>) {
    if !candidate.is_file() {
        return;
    }
    let canonical = weak_canonicalize(candidate);
    if seen.insert(canonical.clone()) {
        out.push(canonical);
    }
}

fn read_sorted_dir(dir: &Path) -> std::io::Result<Vec<std::fs::DirEntry>> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
