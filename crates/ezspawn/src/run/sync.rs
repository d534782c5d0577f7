// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Instant;

use super::{record_outcome, spawn_span};
use crate::error::SpawnError;
use crate::normalize::{normalize, InvocationSpec};
use crate::platform::Spawner;
use crate::process::Process;

/// Blocking spawn. A non-zero exit becomes [`SpawnError::Failed`].
pub(super) fn execute<S: Spawner>(spawner: &S, spec: InvocationSpec) -> Result<Process, SpawnError> {
    let invocation = normalize(spec)?;

    let span = spawn_span(&invocation);
    let _guard = span.enter();
    let start = Instant::now();

    let raw = spawner.spawn_sync(&invocation);
    let process = Process::from_raw(&invocation, raw);
    record_outcome(&span, &process, start);

    Ok(process.check()?)
}
