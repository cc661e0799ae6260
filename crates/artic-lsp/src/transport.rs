// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Blocking `Content-Length`-framed JSON-RPC transport over standard I/O
//! (§5 `[AMBIENT]`, §6 "standard JSON-RPC over standard input/output").
//!
//! Deliberately synchronous: one read and one write per message, no
//! buffering beyond what `BufRead` gives for free. This is the piece that
//! makes the single-threaded, handler-runs-to-completion discipline of §5
//! actually true — an async transport that hands each request to its own
//! task could not guarantee it.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::TransportError;

const CONTENT_LENGTH: &str = "Content-Length:";

/// Reads one framed message, or `None` on a clean EOF before any header
/// bytes arrive (the client closed the stream).
pub fn read_message(input: &mut impl BufRead) -> Result<Option<Value>, TransportError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = input.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(value) = trimmed.strip_prefix(CONTENT_LENGTH) {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| TransportError::Framing(format!("invalid Content-Length: {value}")))?;
            content_length = Some(parsed);
        }
        // Unrecognized headers (e.g. Content-Type) are ignored per the LSP spec.
    }

    let length = content_length
        .ok_or_else(|| TransportError::Framing("message header had no Content-Length".to_string()))?;

    let mut body = vec![0u8; length];
    input.read_exact(&mut body)?;
    let value = serde_json::from_slice(&body)?;
    Ok(Some(value))
}

/// Writes one framed message.
pub fn write_message(output: &mut impl Write, value: &Value) -> Result<(), TransportError> {
    let body = serde_json::to_vec(value)?;
    write!(output, "Content-Length: {}\r\n\r\n", body.len())?;
    output.write_all(&body)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_message() {
        let mut buffer = Vec::new();
        let message = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"});
        write_message(&mut buffer, &message).unwrap();

        let mut cursor = Cursor::new(buffer);
        let read_back = read_message(&mut cursor).unwrap().unwrap();
        assert_eq!(read_back, message);
    }

    #[test]
    fn clean_eof_before_any_header_is_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(read_message(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn missing_content_length_is_a_framing_error() {
        let mut cursor = Cursor::new(b"Content-Type: application/json\r\n\r\n".to_vec());
        let err = read_message(&mut cursor).unwrap_err();
        assert!(matches!(err, TransportError::Framing(_)));
    }

    #[test]
    fn ignores_unrecognized_headers() {
        let mut buffer = Vec::new();
        write_message(&mut buffer, &json!({"ok": true})).unwrap();
        // splice an extra header line in before the blank line
        let text = String::from_utf8(buffer).unwrap();
        let spliced = text.replacen("\r\n\r\n", "\r\nX-Extra: 1\r\n\r\n", 1);
        let mut cursor = Cursor::new(spliced.into_bytes());
        let value = read_message(&mut cursor).unwrap().unwrap();
        assert_eq!(value, json!({"ok": true}));
    }
}
