// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The OS-facing side: starting a child and reporting what it did.

mod system;

use std::io;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::normalize::Invocation;

pub use system::SystemSpawner;

/// The program could not be started (not found, not executable, ...).
///
/// Recorded on [`Process::error`](crate::Process::error); never raised by
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to spawn `{command}`: {message}")]
pub struct LaunchError {
    pub command: String,
    pub kind: io::ErrorKind,
    pub message: String,
}

impl LaunchError {
    pub fn new(command: impl Into<String>, source: &io::Error) -> Self {
        Self {
            command: command.into(),
            kind: source.kind(),
            message: source.to_string(),
        }
    }
}

/// Raw result of a blocking spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub pid: Option<u32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: Option<i32>,
    pub signal: Option<String>,
    pub error: Option<LaunchError>,
}

impl RawOutput {
    pub fn launch_failure(error: LaunchError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// One event from a non-blocking spawn.
///
/// A stream ends with exactly one terminal event: `Error` or `Exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnEvent {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
    Error(LaunchError),
    Exit {
        code: Option<i32>,
        signal: Option<String>,
    },
}

impl SpawnEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SpawnEvent::Error(_) | SpawnEvent::Exit { .. })
    }
}

/// A running (or failed-to-start) child, seen as a stream of events.
#[derive(Debug)]
pub struct SpawnHandle {
    pub pid: Option<u32>,
    pub events: mpsc::UnboundedReceiver<SpawnEvent>,
}

impl SpawnHandle {
    /// A handle whose only event is the given launch error.
    pub fn failed(error: LaunchError) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(SpawnEvent::Error(error));
        Self {
            pid: None,
            events: rx,
        }
    }
}

/// Starts processes.
///
/// `spawn_sync` blocks until the child exits. `spawn` returns at once and
/// reports through the handle's channel; it is called from within a tokio
/// runtime.
pub trait Spawner: Clone + Send + Sync + 'static {
    fn spawn_sync(&self, invocation: &Invocation) -> RawOutput;

    fn spawn(&self, invocation: &Invocation) -> SpawnHandle;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSpawner, SpawnCall};

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
