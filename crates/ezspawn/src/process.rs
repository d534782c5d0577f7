// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The record of one spawn attempt.

use std::fmt;

use crate::error::ProcessError;
use crate::normalize::Invocation;
use crate::options::Encoding;
use crate::output::{Decoder, Output};
use crate::platform::{LaunchError, RawOutput};

/// Everything observable about one spawn attempt.
///
/// Returned by [`sync`](crate::sync) and [`run`](crate::run). When the
/// program could not be started at all, `error` is set and `pid`,
/// `exit_code` and `signal` are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    /// The program that was spawned (argv\[0\]).
    pub command: String,
    /// The arguments passed to it (argv\[1..\]).
    pub args: Vec<String>,
    /// OS process id; `None` if the process never started.
    pub pid: Option<u32>,
    pub stdout: Output,
    pub stderr: Output,
    /// stdout and stderr combined into one value.
    ///
    /// Asynchronous runs append chunks from both streams in the order they
    /// arrived; synchronous runs hold stdout followed by stderr.
    pub output: Output,
    /// Exit status; `None` if the process was killed by a signal or never
    /// exited.
    pub exit_code: Option<i32>,
    /// Name of the terminating signal, e.g. `"SIGTERM"`.
    pub signal: Option<String>,
    /// Why the process could not be started.
    pub error: Option<LaunchError>,
}

impl Process {
    /// A record with empty streams in the invocation's representation.
    pub(crate) fn started(invocation: &Invocation, pid: Option<u32>) -> Self {
        let empty = Output::empty(invocation.options.resolved_encoding());
        Self {
            command: invocation.command.clone(),
            args: invocation.args.clone(),
            pid,
            stdout: empty.clone(),
            stderr: empty.clone(),
            output: empty,
            exit_code: None,
            signal: None,
            error: None,
        }
    }

    /// Build a record from a blocking spawn's raw result.
    pub(crate) fn from_raw(invocation: &Invocation, raw: RawOutput) -> Self {
        let encoding: Encoding = invocation.options.resolved_encoding();
        let mut process = Self::started(invocation, raw.pid);
        process.stdout = Decoder::decode_all(encoding, &raw.stdout);
        process.stderr = Decoder::decode_all(encoding, &raw.stderr);
        process.output = crate::concat(Some(process.stdout.clone()), Some(process.stderr.clone()));
        if let Some(error) = raw.error {
            process.error = Some(error);
        } else {
            process.exit_code = raw.status;
            process.signal = raw.signal;
        }
        process
    }

    /// argv: the command followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Alias for `exit_code`.
    pub fn status(&self) -> Option<i32> {
        self.exit_code
    }

    /// True when the process started and exited with status 0.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.exit_code == Some(0)
    }

    /// Turn a non-zero exit into a [`ProcessError`].
    ///
    /// Launch errors and signal deaths pass through as `Ok`; inspect
    /// `error` and `signal` for those.
    pub fn check(self) -> Result<Process, ProcessError> {
        match self.exit_code {
            Some(code) if code != 0 => Err(ProcessError::new(self)),
            _ => Ok(self),
        }
    }

    /// The command line, quoted for display.
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Process {
    /// Formats argv separated by spaces. Embedded `"` are escaped and
    /// elements containing whitespace are wrapped in double quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.argv().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let escaped = part.replace('"', "\\\"");
            if escaped.chars().any(char::is_whitespace) {
                write!(f, "\"{escaped}\"")?;
            } else {
                f.write_str(&escaped)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
