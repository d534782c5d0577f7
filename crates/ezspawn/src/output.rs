// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Captured stream contents and the decoders that produce them.

use std::borrow::Cow;
use std::fmt;

use crate::options::Encoding;

/// Captured output of one stream, as text or raw bytes.
///
/// The representation is fixed per invocation by [`Encoding`]: every
/// stream of a [`Process`](crate::Process) shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Bytes(Vec<u8>),
}

impl Output {
    /// The empty value for the given encoding.
    pub fn empty(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Buffer => Output::Bytes(Vec::new()),
            Encoding::Utf8 | Encoding::Latin1 => Output::Text(String::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        match self {
            Output::Text(s) => s.len(),
            Output::Bytes(b) => b.len(),
        }
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Output::Bytes(_))
    }

    /// Text view; raw bytes are decoded lossily as UTF-8.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Output::Text(s) => Cow::Borrowed(s),
            Output::Bytes(b) => String::from_utf8_lossy(b),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Output::Text(s) => s.as_bytes(),
            Output::Bytes(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Output::Text(s) => s.into_bytes(),
            Output::Bytes(b) => b,
        }
    }

    /// Append `other` to `self`. See [`concat`](crate::concat).
    pub fn concat(self, other: Output) -> Output {
        crate::concat(Some(self), Some(other))
    }
}

impl Default for Output {
    fn default() -> Self {
        Output::Text(String::new())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<String> for Output {
    fn from(s: String) -> Self {
        Output::Text(s)
    }
}

impl From<&str> for Output {
    fn from(s: &str) -> Self {
        Output::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Output {
    fn from(b: Vec<u8>) -> Self {
        Output::Bytes(b)
    }
}

impl From<&[u8]> for Output {
    fn from(b: &[u8]) -> Self {
        Output::Bytes(b.to_vec())
    }
}

impl PartialEq<str> for Output {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Output::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Output {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<[u8]> for Output {
    fn eq(&self, other: &[u8]) -> bool {
        matches!(self, Output::Bytes(b) if b == other)
    }
}

impl PartialEq<&[u8]> for Output {
    fn eq(&self, other: &&[u8]) -> bool {
        self == *other
    }
}

impl PartialEq<Vec<u8>> for Output {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self == other.as_slice()
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Incremental decoder turning raw pipe chunks into [`Output`] values.
///
/// UTF-8 sequences split across chunk boundaries are held back until the
/// rest of the sequence arrives, so a character is never mangled by the
/// way the OS happened to slice the pipe.
#[derive(Debug)]
pub(crate) struct Decoder {
    encoding: Encoding,
    pending: Vec<u8>,
}

impl Decoder {
    pub(crate) fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
        }
    }

    /// Decode one chunk, keeping any incomplete trailing sequence.
    pub(crate) fn decode(&mut self, chunk: &[u8]) -> Output {
        match self.encoding {
            Encoding::Buffer => Output::Bytes(chunk.to_vec()),
            Encoding::Latin1 => Output::Text(chunk.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => {
                self.pending.extend_from_slice(chunk);
                let split = incomplete_tail(&self.pending);
                let tail = self.pending.split_off(split);
                let complete = std::mem::replace(&mut self.pending, tail);
                Output::Text(String::from_utf8_lossy(&complete).into_owned())
            }
        }
    }

    /// Decode whatever is still held back. Returns `None` when nothing is.
    pub(crate) fn flush(&mut self) -> Option<Output> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(Output::Text(String::from_utf8_lossy(&rest).into_owned()))
    }

    /// Decode a complete buffer in one go.
    pub(crate) fn decode_all(encoding: Encoding, bytes: &[u8]) -> Output {
        let mut decoder = Decoder::new(encoding);
        let head = decoder.decode(bytes);
        match decoder.flush() {
            Some(rest) => head.concat(rest),
            None => head,
        }
    }
}

/// Index at which an incomplete UTF-8 sequence at the end of `bytes`
/// begins, or `bytes.len()` when the buffer ends on a boundary.
fn incomplete_tail(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for back in 1..=len.min(3) {
        let byte = bytes[len - back];
        if byte & 0b1100_0000 == 0b1000_0000 {
            // continuation byte, keep looking for the lead byte
            continue;
        }
        let needed = match byte {
            0xF0..=0xFF => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            _ => 1,
        };
        return if needed > back { len - back } else { len };
    }
    len
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
