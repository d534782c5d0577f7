//! Shared helpers for the specs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

pub use ezspawn::{params, Encoding, InvocationSpec, Output, Process, SpawnError, SpawnOptions};
pub use serde_json::json;

pub const ECHO_ARGS: &str = env!("CARGO_BIN_EXE_echo-args");
pub const EXIT_CODE: &str = env!("CARGO_BIN_EXE_exit-code");
pub const ECHO_FILE: &str = env!("CARGO_BIN_EXE_echo-file");

/// The three ways to call a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sync,
    Async,
    Callback,
}

pub const MODES: [Mode; 3] = [Mode::Sync, Mode::Async, Mode::Callback];

impl Mode {
    /// Spawn and apply the blocking runner's failure policy, so every mode
    /// can be checked against the same expectations.
    pub fn spawn(self, spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
        self.spawn_raw(spec).and_then(|p| Ok(p.check()?))
    }

    /// Spawn with the mode's own failure policy.
    pub fn spawn_raw(self, spec: impl Into<InvocationSpec>) -> Result<Process, SpawnError> {
        init_tracing();
        let spec = spec.into();
        match self {
            Mode::Sync => ezspawn::sync(spec),
            Mode::Async => runtime().block_on(ezspawn::run(spec)),
            Mode::Callback => runtime().block_on(async move {
                let (tx, rx) = tokio::sync::oneshot::channel();
                ezspawn::run_with_callback(spec, move |result| {
                    let _ = tx.send(result);
                });
                rx.await.expect("callback was never invoked")
            }),
        }
    }
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

/// Install a test subscriber once; `RUST_LOG=ezspawn=debug` shows spans.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Scratch directory with generated input files.
pub struct Files {
    pub dir: tempfile::TempDir,
}

impl Files {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file and return its absolute path as a string.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> String {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path.to_string_lossy().into_owned()
    }

    pub fn small_text(&self) -> (String, String) {
        let text = "Hello, world!\nThis is a small text file.\n".to_string();
        (self.write("small-text-file.txt", &text), text)
    }

    pub fn large_text(&self) -> (String, String) {
        let text: String = (0..5_000)
            .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog\n"))
            .collect();
        (self.write("large-text-file.txt", &text), text)
    }

    /// Binary content with every byte value, including invalid UTF-8.
    pub fn binary(&self) -> (String, Vec<u8>) {
        let bytes: Vec<u8> = (0..64 * 1024).map(|i| (i * 7 % 256) as u8).collect();
        (self.write("image-file.jpg", &bytes), bytes)
    }
}
