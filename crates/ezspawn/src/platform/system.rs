// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real process spawning via `std::process` and `tokio::process`.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{LaunchError, RawOutput, SpawnEvent, SpawnHandle, Spawner};
use crate::normalize::Invocation;
use crate::options::{Shell, Stdio, StdioConfig};

/// Read size for pipe draining.
const CHUNK_SIZE: usize = 8 * 1024;

/// How often a blocking wait re-checks its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Spawns real OS processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSpawner;

impl SystemSpawner {
    pub fn new() -> Self {
        Self
    }
}

impl Spawner for SystemSpawner {
    fn spawn_sync(&self, invocation: &Invocation) -> RawOutput {
        let limits = Limits::resolve(invocation);
        let mut child = match build_command(invocation).spawn() {
            Ok(child) => child,
            Err(e) => return RawOutput::launch_failure(LaunchError::new(&invocation.command, &e)),
        };
        let pid = child.id();
        let overflow = Arc::new(AtomicBool::new(false));

        let feeder = child.stdin.take().map(|mut stdin| {
            let data = input_bytes(invocation);
            thread::spawn(move || {
                if let Some(data) = data {
                    let _ = stdin.write_all(&data);
                }
                // dropping stdin closes the pipe
            })
        });
        let stdout = child.stdout.take().map(|reader| {
            let overflow = Arc::clone(&overflow);
            thread::spawn(move || read_capped(reader, limits.max_buffer, &overflow))
        });
        let stderr = child.stderr.take().map(|reader| {
            let overflow = Arc::clone(&overflow);
            thread::spawn(move || read_capped(reader, limits.max_buffer, &overflow))
        });

        let status = wait_blocking(&mut child, &limits, &overflow);

        let stdout = stdout.and_then(|h| h.join().ok()).unwrap_or_default();
        let stderr = stderr.and_then(|h| h.join().ok()).unwrap_or_default();
        if let Some(feeder) = feeder {
            let _ = feeder.join();
        }

        match status {
            Ok(status) => {
                let (code, signal) = exit_parts(status);
                RawOutput {
                    pid: Some(pid),
                    stdout,
                    stderr,
                    status: code,
                    signal,
                    error: None,
                }
            }
            Err(e) => RawOutput {
                pid: Some(pid),
                stdout,
                stderr,
                error: Some(LaunchError::new(&invocation.command, &e)),
                ..RawOutput::default()
            },
        }
    }

    fn spawn(&self, invocation: &Invocation) -> SpawnHandle {
        let limits = Limits::resolve(invocation);
        let mut command = tokio::process::Command::from(build_command(invocation));
        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return SpawnHandle::failed(LaunchError::new(&invocation.command, &e)),
        };
        let pid = child.id();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(
            child,
            input_bytes(invocation),
            limits,
            invocation.command.clone(),
            tx,
        ));
        SpawnHandle { pid, events: rx }
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Timeout / buffer limits with environment defaults applied. A zero
/// timeout means none.
#[derive(Debug, Clone)]
pub(super) struct Limits {
    pub(super) timeout: Option<Duration>,
    pub(super) kill_signal: String,
    pub(super) max_buffer: Option<usize>,
}

impl Limits {
    pub(super) fn resolve(invocation: &Invocation) -> Self {
        let options = &invocation.options;
        Self {
            timeout: options
                .timeout_duration()
                .or_else(crate::env::timeout)
                .filter(|t| !t.is_zero()),
            kill_signal: options
                .kill_signal
                .clone()
                .unwrap_or_else(crate::env::kill_signal),
            max_buffer: options.max_buffer.or_else(crate::env::max_buffer),
        }
    }
}

// ---------------------------------------------------------------------------
// Command construction
// ---------------------------------------------------------------------------

/// Translate an invocation into a `std::process::Command`.
///
/// The async path converts the result with `tokio::process::Command::from`.
fn build_command(invocation: &Invocation) -> std::process::Command {
    let options = &invocation.options;
    let (program, args) = resolve_program(invocation);

    let mut command = std::process::Command::new(program);
    command.args(args);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    if let Some(env) = &options.env {
        command.env_clear();
        command.envs(env);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        if let Some(uid) = options.uid {
            command.uid(uid);
        }
        if let Some(gid) = options.gid {
            command.gid(gid);
        }
    }

    let stdio = options.stdio.unwrap_or(StdioConfig::All(Stdio::Pipe));
    let stdin = if options.input.is_some() {
        Stdio::Pipe
    } else {
        stdio.stdin()
    };
    command.stdin(to_std(stdin));
    command.stdout(to_std(stdio.stdout()));
    command.stderr(to_std(stdio.stderr()));
    command
}

fn to_std(mode: Stdio) -> std::process::Stdio {
    match mode {
        Stdio::Pipe => std::process::Stdio::piped(),
        Stdio::Inherit => std::process::Stdio::inherit(),
        Stdio::Ignore => std::process::Stdio::null(),
    }
}

/// Program and arguments, wrapped in a shell when requested.
pub(super) fn resolve_program(invocation: &Invocation) -> (PathBuf, Vec<String>) {
    match &invocation.options.shell {
        Shell::Enabled(false) => (
            PathBuf::from(&invocation.command),
            invocation.args.clone(),
        ),
        Shell::Enabled(true) => shell_program(crate::env::shell(), invocation),
        Shell::Path(path) => shell_program(path.clone(), invocation),
    }
}

/// The command line is passed verbatim; quoting is the caller's job.
fn shell_program(shell: PathBuf, invocation: &Invocation) -> (PathBuf, Vec<String>) {
    let mut line = invocation.command.clone();
    for arg in &invocation.args {
        line.push(' ');
        line.push_str(arg);
    }
    #[cfg(windows)]
    let args = vec!["/d".to_string(), "/s".to_string(), "/c".to_string(), line];
    #[cfg(not(windows))]
    let args = vec!["-c".to_string(), line];
    (shell, args)
}

fn input_bytes(invocation: &Invocation) -> Option<Vec<u8>> {
    invocation
        .options
        .input
        .as_ref()
        .map(|input| input.as_bytes().to_vec())
}

// ---------------------------------------------------------------------------
// Blocking path
// ---------------------------------------------------------------------------

/// Drain a pipe, keeping at most `cap` bytes. Flags `overflow` when more
/// arrived than fit.
fn read_capped<R: Read>(mut reader: R, cap: Option<usize>, overflow: &AtomicBool) -> Vec<u8> {
    let mut captured = Vec::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        };
        let take = cap.map_or(n, |cap| n.min(cap.saturating_sub(captured.len())));
        captured.extend_from_slice(&buf[..take]);
        if take < n {
            overflow.store(true, Ordering::SeqCst);
            break;
        }
    }
    captured
}

fn wait_blocking(
    child: &mut std::process::Child,
    limits: &Limits,
    overflow: &AtomicBool,
) -> io::Result<ExitStatus> {
    if limits.timeout.is_none() && limits.max_buffer.is_none() {
        return child.wait();
    }
    let deadline = limits.timeout.map(|t| Instant::now() + t);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        let timed_out = deadline.is_some_and(|d| Instant::now() >= d);
        if timed_out || overflow.load(Ordering::SeqCst) {
            let reason = if timed_out { "timeout" } else { "maxBuffer" };
            tracing::warn!(
                pid = child.id(),
                signal = %limits.kill_signal,
                reason,
                "terminating child"
            );
            if let Err(e) = signal_pid(child.id(), &limits.kill_signal) {
                tracing::warn!(error = %e, "signal failed, killing");
                let _ = child.kill();
            }
            return child.wait();
        }
        thread::sleep(POLL_INTERVAL);
    }
}

// ---------------------------------------------------------------------------
// Non-blocking path
// ---------------------------------------------------------------------------

/// Feed stdin, pump both pipes into the channel, then report the exit.
///
/// The terminal event is sent only after both readers finished, so every
/// data event precedes it.
async fn drive(
    mut child: tokio::process::Child,
    input: Option<Vec<u8>>,
    limits: Limits,
    command: String,
    tx: mpsc::UnboundedSender<SpawnEvent>,
) {
    let overflow = CancellationToken::new();
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let feed = async move {
        if let (Some(mut stdin), Some(data)) = (stdin, input) {
            let _ = stdin.write_all(&data).await;
        }
    };
    let out = pump(stdout, SpawnEvent::Stdout, limits.max_buffer, &overflow, &tx);
    let err = pump(stderr, SpawnEvent::Stderr, limits.max_buffer, &overflow, &tx);
    let wait = wait_async(&mut child, &limits, &overflow);

    let (status, (), (), ()) = tokio::join!(wait, feed, out, err);

    let event = match status {
        Ok(status) => {
            let (code, signal) = exit_parts(status);
            SpawnEvent::Exit { code, signal }
        }
        Err(e) => SpawnEvent::Error(LaunchError::new(command, &e)),
    };
    let _ = tx.send(event);
}

async fn pump<R>(
    reader: Option<R>,
    wrap: fn(Vec<u8>) -> SpawnEvent,
    cap: Option<usize>,
    overflow: &CancellationToken,
    tx: &mpsc::UnboundedSender<SpawnEvent>,
) where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return;
    };
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0usize;
    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        let take = cap.map_or(n, |cap| n.min(cap.saturating_sub(total)));
        if take > 0 {
            total += take;
            let _ = tx.send(wrap(buf[..take].to_vec()));
        }
        if take < n {
            overflow.cancel();
            break;
        }
    }
}

async fn wait_async(
    child: &mut tokio::process::Child,
    limits: &Limits,
    overflow: &CancellationToken,
) -> io::Result<ExitStatus> {
    let deadline = async {
        match limits.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending().await,
        }
    };
    let reason = tokio::select! {
        status = child.wait() => return status,
        () = deadline => "timeout",
        () = overflow.cancelled() => "maxBuffer",
    };

    tracing::warn!(
        pid = child.id(),
        signal = %limits.kill_signal,
        reason,
        "terminating child"
    );
    let signalled = match child.id() {
        Some(pid) => signal_pid(pid, &limits.kill_signal),
        None => Ok(()),
    };
    if let Err(e) = signalled {
        tracing::warn!(error = %e, "signal failed, killing");
        let _ = child.start_kill();
    }
    child.wait().await
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn signal_pid(pid: u32, name: &str) -> io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let signal: Signal = name.parse().map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("unknown signal `{name}`"))
    })?;
    kill(Pid::from_raw(pid as i32), signal).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn signal_pid(_pid: u32, name: &str) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot send `{name}` on this platform"),
    ))
}

#[cfg(unix)]
fn exit_parts(status: ExitStatus) -> (Option<i32>, Option<String>) {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    let signal = status.signal().map(|n| {
        Signal::try_from(n)
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|_| n.to_string())
    });
    (status.code(), signal)
}

#[cfg(not(unix))]
fn exit_parts(status: ExitStatus) -> (Option<i32>, Option<String>) {
    (status.code(), None)
}
