//! SSE framing (Bytes -> lines -> frames).
//!
//! Only `data:` lines carry payloads. Blank lines, comments (`:`), and `event:`,
//! `id:` and `retry:` fields are skipped.

use bytes::BytesMut;

/// Event-data marker that prefixes every payload line.
pub const DATA_PREFIX: &str = "data:";
/// Literal payload that ends a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Meaning of one SSE line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    Skip,
    Done,
    Data(&'a str),
}

/// Classify one line (with or without its trailing newline).
pub fn parse_line(line: &str) -> Frame<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Frame::Skip;
    }
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    let payload = payload.trim_start();
    if payload == DONE_SENTINEL {
        Frame::Done
    } else {
        Frame::Data(payload)
    }
}

/// Incrementally buffers body bytes and hands out complete `\n`-terminated lines.
///
/// Bytes are buffered raw, so a multi-byte character split across two network
/// chunks is reassembled before decoding. Each byte is scanned for `\n` once,
/// however many chunks a long line arrives in.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
    /// Prefix of `buf` already known to hold no newline
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete line without its terminator, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let Some(offset) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') else {
            self.scanned = self.buf.len();
            return None;
        };
        let idx = self.scanned + offset;
        self.scanned = 0;
        let line = self.buf.split_to(idx + 1);
        Some(String::from_utf8_lossy(&line[..idx]).into_owned())
    }

    /// Whatever is left after end of input, if it is not just whitespace.
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        self.scanned = 0;
        let rest = self.buf.split();
        let s = String::from_utf8_lossy(&rest).into_owned();
        if s.trim().is_empty() {
            None
        } else {
            Some(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
