// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shape-preserving concatenation of captured output.

use crate::output::Output;

/// Concatenate two outputs, treating `None` as empty.
///
/// Bytes win: if either operand is [`Output::Bytes`] the result is bytes,
/// with a text operand converted to its UTF-8 encoding first. Otherwise
/// the result is text.
///
/// Works as a fold reducer over any number of chunks:
///
/// ```
/// use ezspawn::{concat, Output};
///
/// let chunks = vec![Output::from("a"), Output::from("b"), Output::from("c")];
/// let joined = chunks.into_iter().map(Some).fold(None, |acc, c| Some(concat(acc, c)));
/// assert_eq!(joined, Some(Output::from("abc")));
/// ```
pub fn concat(a: Option<Output>, b: Option<Output>) -> Output {
    match (a, b) {
        (None, None) => Output::Text(String::new()),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (Some(Output::Text(mut a)), Some(Output::Text(b))) => {
            a.push_str(&b);
            Output::Text(a)
        }
        (Some(a), Some(b)) => {
            let mut bytes = a.into_bytes();
            bytes.extend_from_slice(b.as_bytes());
            Output::Bytes(bytes)
        }
    }
}

#[cfg(test)]
#[path = "concat_tests.rs"]
mod tests;
