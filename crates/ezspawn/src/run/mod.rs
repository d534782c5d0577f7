// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runners: normalize, spawn, collect into a [`Process`].
//!
//! [`sync`] blocks and raises a [`ProcessError`](crate::ProcessError) for
//! a non-zero exit. [`run`] resolves with the record in every case where
//! the parameters were valid; call [`Process::check`] to get the blocking
//! runner's failure policy.

mod async_run;
mod sync;

use std::time::Instant;

use crate::error::SpawnError;
use crate::normalize::{Invocation, InvocationSpec};
use crate::platform::{Spawner, SystemSpawner};
use crate::process::Process;

/// Runs invocations through a [`Spawner`].
#[derive(Debug, Clone, Default)]
pub struct Runner<S = SystemSpawner> {
    spawner: S,
}

impl Runner<SystemSpawner> {
    pub fn new() -> Self {
        Self { spawner: SystemSpawner }
    }
}

impl<S: Spawner> Runner<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Spawn and block until the child exits.
    pub fn sync(&self, spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
        sync::execute(&self.spawner, spec.into())
    }

    /// Spawn without blocking and resolve once the child is done.
    pub async fn run(&self, spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
        async_run::execute(&self.spawner, spec.into()).await
    }

    /// Callback form of [`Runner::run`].
    ///
    /// The work runs on a task of the current tokio runtime and `callback`
    /// is invoked exactly once with its result. Outside a runtime nothing
    /// is spawned and `callback` receives [`SpawnError::NoRuntime`] on the
    /// calling thread.
    pub fn run_with_callback<F>(&self, spec: impl Into<InvocationSpec>, callback: F)
    where
        F: FnOnce(Result<Process, SpawnError>) + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(error = %e, "run_with_callback outside a tokio runtime");
                callback(Err(SpawnError::NoRuntime { message: e.to_string() }));
                return;
            }
        };
        let spawner = self.spawner.clone();
        let spec = spec.into();
        runtime.spawn(async move {
            callback(async_run::execute(&spawner, spec).await);
        });
    }
}

/// Spawn with the system spawner and block until the child exits.
pub fn sync(spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
    Runner::new().sync(spec)
}

/// Spawn with the system spawner without blocking.
pub async fn run(spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
    Runner::new().run(spec).await
}

/// Callback form of [`run`]. See [`Runner::run_with_callback`].
pub fn run_with_callback<F>(spec: impl Into<InvocationSpec>, callback: F)
where
    F: FnOnce(Result<Process, SpawnError>) + Send + 'static,
{
    Runner::new().run_with_callback(spec, callback)
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn spawn_span(invocation: &Invocation) -> tracing::Span {
    tracing::info_span!(
        "ezspawn.spawn",
        cmd = %invocation.command,
        args = ?invocation.args,
        pid = tracing::field::Empty,
        exit_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

fn record_outcome(span: &tracing::Span, process: &Process, start: Instant) {
    if let Some(pid) = process.pid {
        span.record("pid", pid);
    }
    if let Some(code) = process.exit_code {
        span.record("exit_code", code);
    }
    span.record("duration_ms", start.elapsed().as_millis() as u64);

    if let Some(error) = &process.error {
        tracing::warn!(parent: span, error = %error, "spawn failed");
    } else if let Some(signal) = &process.signal {
        tracing::info!(parent: span, %signal, "terminated by signal");
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
