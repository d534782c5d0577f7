// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawn options.
//!
//! Keys use camelCase on the wire so a JSON object such as
//! `{"cwd": "/tmp", "encoding": "buffer", "maxBuffer": 1024}` deserializes
//! directly. Unrecognized keys are kept in [`SpawnOptions::extra`].

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How captured output is represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 text (the default).
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// ISO-8859-1 text; every byte maps to one char.
    #[serde(alias = "binary")]
    Latin1,
    /// Raw bytes, no decoding.
    Buffer,
}

crate::simple_display! {
    Encoding {
        Utf8 => "utf8",
        Latin1 => "latin1",
        Buffer => "buffer",
    }
}

/// Whether to run the command through a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shell {
    Enabled(bool),
    Path(PathBuf),
}

impl Default for Shell {
    fn default() -> Self {
        Shell::Enabled(false)
    }
}

/// Disposition of one standard stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stdio {
    #[default]
    Pipe,
    Inherit,
    Ignore,
}

crate::simple_display! {
    Stdio {
        Pipe => "pipe",
        Inherit => "inherit",
        Ignore => "ignore",
    }
}

/// `stdio` option: one mode for all streams, or `[stdin, stdout, stderr]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StdioConfig {
    All(Stdio),
    Each([Stdio; 3]),
}

impl StdioConfig {
    pub fn stdin(&self) -> Stdio {
        self.stream(0)
    }

    pub fn stdout(&self) -> Stdio {
        self.stream(1)
    }

    pub fn stderr(&self) -> Stdio {
        self.stream(2)
    }

    fn stream(&self, idx: usize) -> Stdio {
        match self {
            StdioConfig::All(mode) => *mode,
            StdioConfig::Each(modes) => modes[idx],
        }
    }
}

/// Data written to the child's stdin before it is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input {
    Text(String),
    Bytes(Vec<u8>),
}

impl Input {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Text(s) => s.as_bytes(),
            Input::Bytes(b) => b,
        }
    }
}

/// Options controlling how a process is spawned.
///
/// Only `encoding` is interpreted before spawning; every other field is
/// handed to the [`Spawner`](crate::Spawner) untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnOptions {
    /// Working directory of the child.
    pub cwd: Option<PathBuf>,
    /// Replaces the child's environment when set.
    pub env: Option<IndexMap<String, String>>,
    /// Output representation; `None` means UTF-8 text.
    pub encoding: Option<Encoding>,
    /// Milliseconds before the child is sent `kill_signal`.
    pub timeout: Option<u64>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub shell: Shell,
    pub stdio: Option<StdioConfig>,
    pub input: Option<Input>,
    /// Signal name used by `timeout` and `max_buffer`, e.g. `"SIGKILL"`.
    pub kill_signal: Option<String>,
    /// Per-stream byte cap on captured output.
    pub max_buffer: Option<usize>,
    /// Keys this crate does not recognize.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SpawnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The effective encoding.
    pub fn resolved_encoding(&self) -> Encoding {
        self.encoding.unwrap_or_default()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }

    // -----------------------------------------------------------------------
    // Builder methods
    // -----------------------------------------------------------------------

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set one environment variable. The first call starts from an empty
    /// environment, not the parent's.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = self.env.get_or_insert_with(IndexMap::new);
        for (k, v) in vars {
            env.insert(k.into(), v.into());
        }
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout.as_millis() as u64);
        self
    }

    pub fn uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn gid(mut self, gid: u32) -> Self {
        self.gid = Some(gid);
        self
    }

    pub fn shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    pub fn stdio(mut self, stdio: StdioConfig) -> Self {
        self.stdio = Some(stdio);
        self
    }

    pub fn input(mut self, input: impl Into<Input>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn kill_signal(mut self, signal: impl Into<String>) -> Self {
        self.kill_signal = Some(signal.into());
        self
    }

    pub fn max_buffer(mut self, bytes: usize) -> Self {
        self.max_buffer = Some(bytes);
        self
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Input {
    fn from(b: Vec<u8>) -> Self {
        Input::Bytes(b)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
