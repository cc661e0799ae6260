// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! 1-based (line, column) locations (used internally, matching the
//! compile frontend's contract) to LSP's 0-based (line, character)
//! `Position`/`Range` (§4.6, §6).

use artic_compiler_frontend::Location;
use lsp_types::{Position, Range};

/// Converts an internal 1-based location to an LSP 0-based position.
pub fn to_lsp_position(location: Location) -> Position {
    Position {
        line: location.line.saturating_sub(1),
        character: location.column.saturating_sub(1),
    }
}

/// A zero-width range at `location`, for diagnostics the frontend doesn't
/// give an end position for.
pub fn point_range(location: Location) -> Range {
    let position = to_lsp_position(location);
    Range {
        start: position,
        end: position,
    }
}

/// A byte-offset span (from the literal locator, §4.2.1) converted to an
/// LSP range, given the full document text it was found in.
pub fn byte_span_to_range(text: &str, start: usize, end: usize) -> Range {
    Range {
        start: offset_to_position(text, start),
        end: offset_to_position(text, end),
    }
}

fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut last_newline = 0usize;
    for (idx, ch) in text.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            last_newline = idx + 1;
        }
    }
    let character = text[last_newline..offset.min(text.len())].chars().count() as u32;
    Position { line, character }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_one_based_to_zero_based() {
        let position = to_lsp_position(Location::new(1, 1));
        assert_eq!(position, Position { line: 0, character: 0 });
    }

    #[test]
    fn offset_to_position_tracks_newlines() {
        let text = "abc\ndef\nghi";
        assert_eq!(offset_to_position(text, 0), Position { line: 0, character: 0 });
        assert_eq!(offset_to_position(text, 4), Position { line: 1, character: 0 });
        assert_eq!(offset_to_position(text, 9), Position { line: 2, character: 1 });
    }
}
