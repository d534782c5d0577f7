// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types: caller mistakes and failed processes.

use std::fmt;

use thiserror::Error;

use crate::process::Process;

/// What was wrong with the invocation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeErrorKind {
    /// No command, or a blank one.
    MissingCommand,
    /// The command position held something other than a string.
    CommandNotString { type_name: &'static str },
    /// An argument was not a string. `position` is 1-based.
    ArgNotString {
        position: usize,
        type_name: &'static str,
    },
    /// The trailing options object did not deserialize.
    InvalidOptions { message: String },
}

impl fmt::Display for NormalizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => f.write_str("The command to execute is missing."),
            Self::CommandNotString { type_name } => write!(
                f,
                "The command to execute should be a string, not {} {type_name}.",
                article(type_name)
            ),
            Self::ArgNotString {
                position,
                type_name,
            } => write!(
                f,
                "The command arguments should be strings, but argument #{position} is {} {type_name}.",
                article(type_name)
            ),
            Self::InvalidOptions { message } => write!(f, "The options are invalid: {message}"),
        }
    }
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// The invocation could not be normalized; nothing was spawned.
///
/// `command` and `args` are a best-effort rendering of what the caller
/// passed, non-strings included, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct NormalizeError {
    pub kind: NormalizeErrorKind,
    pub command: String,
    pub args: Vec<String>,
}

/// A process that ran and exited with a non-zero status.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProcessError {
    message: String,
    process: Process,
}

impl ProcessError {
    /// Promote a record to a failure. The message is the generic status
    /// sentence, followed by the trimmed stderr when there is any.
    pub fn new(process: Process) -> Self {
        let code = process
            .exit_code
            .map_or_else(|| "null".to_string(), |c| c.to_string());
        let mut message = format!("{process} exited with a status of {code}.");
        let stderr = process.stderr.as_text();
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            message.push_str("\n\n");
            message.push_str(stderr);
        }
        Self { message, process }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    pub fn into_process(self) -> Process {
        self.process
    }
}

/// Errors returned by the runners.
#[derive(Debug, Clone, Error)]
pub enum SpawnError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Failed(#[from] Box<ProcessError>),

    /// The callback runner was invoked outside a tokio runtime.
    #[error("no tokio runtime to spawn on: {message}")]
    NoRuntime { message: String },
}

impl SpawnError {
    /// The process record, when one exists.
    pub fn process(&self) -> Option<&Process> {
        match self {
            SpawnError::Normalize(_) | SpawnError::NoRuntime { .. } => None,
            SpawnError::Failed(e) => Some(e.process()),
        }
    }

    /// Best-effort command for diagnostics.
    pub fn command(&self) -> &str {
        match self {
            SpawnError::Normalize(e) => &e.command,
            SpawnError::Failed(e) => &e.process().command,
            SpawnError::NoRuntime { .. } => "",
        }
    }

    /// Best-effort arguments for diagnostics.
    pub fn args(&self) -> &[String] {
        match self {
            SpawnError::Normalize(e) => &e.args,
            SpawnError::Failed(e) => &e.process().args,
            SpawnError::NoRuntime { .. } => &[],
        }
    }
}

impl From<ProcessError> for SpawnError {
    fn from(e: ProcessError) -> Self {
        SpawnError::Failed(Box::new(e))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
