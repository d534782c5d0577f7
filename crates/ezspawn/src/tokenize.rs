// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whitespace splitting that respects quotes.
//!
//! This is not a shell lexer: there is no escaping, no
//! expansion, and quotes inside a word are kept as written. The only
//! quote removal is for a word that is one quoted span from end to end,
//! so `"bin/spaces in name"` names a file while `--bar="baz"` reaches the
//! program unchanged.

/// Track quote state while scanning.
#[derive(Default)]
struct QuoteState {
    open: Option<char>,
}

impl QuoteState {
    /// Process a character, updating quote state.
    /// Returns true if the character is inside (or delimits) a quoted span.
    fn process(&mut self, ch: char) -> bool {
        match self.open {
            Some(q) if ch == q => {
                self.open = None;
                true
            }
            Some(_) => true,
            None if ch == '"' || ch == '\'' => {
                self.open = Some(ch);
                true
            }
            None => false,
        }
    }
}

/// Split `input` into words.
pub fn split(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quotes = QuoteState::default();

    for ch in input.chars() {
        let quoted = quotes.process(ch);
        if !quoted && ch.is_whitespace() {
            if in_word {
                words.push(unwrap_quotes(std::mem::take(&mut current)));
                in_word = false;
            }
            continue;
        }
        current.push(ch);
        in_word = true;
    }
    if in_word {
        words.push(unwrap_quotes(current));
    }
    words
}

/// Strip the enclosing quotes of a word that is a single quoted span.
fn unwrap_quotes(word: String) -> String {
    let mut chars = word.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return word;
    };
    if (first != '"' && first != '\'') || first != last {
        return word;
    }
    let inner = &word[1..word.len() - 1];
    // `"a" "b"` glued as `"a""b"` is two spans, not one
    if inner.contains(first) {
        return word;
    }
    inner.to_string()
}

#[cfg(test)]
#[path = "tokenize_tests.rs"]
mod tests;
