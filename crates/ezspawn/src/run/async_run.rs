// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Instant;

use tracing::Instrument;

use super::{record_outcome, spawn_span};
use crate::concat;
use crate::error::SpawnError;
use crate::normalize::{normalize, Invocation, InvocationSpec};
use crate::output::Decoder;
use crate::platform::{SpawnEvent, Spawner};
use crate::process::Process;

/// Non-blocking spawn. Resolves with the record whatever the exit status.
pub(super) async fn execute<S: Spawner>(
    spawner: &S,
    spec: InvocationSpec,
) -> Result<Process, SpawnError> {
    let invocation = normalize(spec)?;
    let span = spawn_span(&invocation);

    async {
        let start = Instant::now();
        let mut handle = spawner.spawn(&invocation);
        let mut acc = Accumulator::new(&invocation, handle.pid);

        while let Some(event) = handle.events.recv().await {
            if acc.apply(event) {
                break;
            }
        }

        let process = acc.finish();
        record_outcome(&tracing::Span::current(), &process, start);
        Ok(process)
    }
    .instrument(span)
    .await
}

/// Single owner of a record under construction.
///
/// Chunks are decoded per stream and appended to that stream and to the
/// combined `output` in arrival order.
struct Accumulator {
    process: Process,
    stdout: Decoder,
    stderr: Decoder,
}

impl Accumulator {
    fn new(invocation: &Invocation, pid: Option<u32>) -> Self {
        let encoding = invocation.options.resolved_encoding();
        Self {
            process: Process::started(invocation, pid),
            stdout: Decoder::new(encoding),
            stderr: Decoder::new(encoding),
        }
    }

    /// Apply one event. Returns true once the record is complete.
    fn apply(&mut self, event: SpawnEvent) -> bool {
        match event {
            SpawnEvent::Stdout(chunk) => {
                let text = self.stdout.decode(&chunk);
                self.append_stdout(text);
                false
            }
            SpawnEvent::Stderr(chunk) => {
                let text = self.stderr.decode(&chunk);
                self.append_stderr(text);
                false
            }
            SpawnEvent::Error(error) => {
                self.process.pid = None;
                self.process.error = Some(error);
                true
            }
            SpawnEvent::Exit { code, signal } => {
                self.process.exit_code = code;
                self.process.signal = signal;
                true
            }
        }
    }

    fn append_stdout(&mut self, chunk: crate::Output) {
        if chunk.is_empty() {
            return;
        }
        let p = &mut self.process;
        p.stdout = concat(Some(std::mem::take(&mut p.stdout)), Some(chunk.clone()));
        p.output = concat(Some(std::mem::take(&mut p.output)), Some(chunk));
    }

    fn append_stderr(&mut self, chunk: crate::Output) {
        if chunk.is_empty() {
            return;
        }
        let p = &mut self.process;
        p.stderr = concat(Some(std::mem::take(&mut p.stderr)), Some(chunk.clone()));
        p.output = concat(Some(std::mem::take(&mut p.output)), Some(chunk));
    }

    /// Flush held-back bytes and hand over the record.
    fn finish(mut self) -> Process {
        if let Some(rest) = self.stdout.flush() {
            self.append_stdout(rest);
        }
        if let Some(rest) = self.stderr.flush() {
            self.append_stderr(rest);
        }
        self.process
    }
}
