// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording spawner for tests.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{RawOutput, SpawnEvent, SpawnHandle, Spawner};
use crate::normalize::Invocation;
use crate::options::SpawnOptions;

/// Recorded spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCall {
    pub command: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
    /// True for `spawn_sync`, false for `spawn`.
    pub blocking: bool,
}

struct Scripted {
    pid: Option<u32>,
    events: Vec<SpawnEvent>,
}

#[derive(Default)]
struct FakeSpawnState {
    calls: Vec<SpawnCall>,
    blocking: VecDeque<RawOutput>,
    streaming: VecDeque<Scripted>,
}

/// Fake spawner: records every call and replays scripted results.
///
/// With nothing scripted, a spawn reports pid 1 and a clean exit.
#[derive(Clone, Default)]
pub struct FakeSpawner {
    inner: Arc<Mutex<FakeSpawnState>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next `spawn_sync`.
    pub fn push_raw(&self, raw: RawOutput) -> &Self {
        self.inner.lock().blocking.push_back(raw);
        self
    }

    /// Queue the events of the next `spawn`, delivered in order.
    pub fn push_events(&self, pid: Option<u32>, events: Vec<SpawnEvent>) -> &Self {
        self.inner.lock().streaming.push_back(Scripted { pid, events });
        self
    }

    /// Get all recorded spawn requests
    pub fn calls(&self) -> Vec<SpawnCall> {
        self.inner.lock().calls.clone()
    }

    fn record(&self, invocation: &Invocation, blocking: bool) {
        self.inner.lock().calls.push(SpawnCall {
            command: invocation.command.clone(),
            args: invocation.args.clone(),
            options: invocation.options.clone(),
            blocking,
        });
    }
}

impl Spawner for FakeSpawner {
    fn spawn_sync(&self, invocation: &Invocation) -> RawOutput {
        self.record(invocation, true);
        self.inner.lock().blocking.pop_front().unwrap_or_else(|| RawOutput {
            pid: Some(1),
            status: Some(0),
            ..RawOutput::default()
        })
    }

    fn spawn(&self, invocation: &Invocation) -> SpawnHandle {
        self.record(invocation, false);
        let scripted = self.inner.lock().streaming.pop_front().unwrap_or_else(|| Scripted {
            pid: Some(1),
            events: vec![SpawnEvent::Exit { code: Some(0), signal: None }],
        });
        let (tx, rx) = mpsc::unbounded_channel();
        for event in scripted.events {
            let _ = tx.send(event);
        }
        SpawnHandle { pid: scripted.pid, events: rx }
    }
}
