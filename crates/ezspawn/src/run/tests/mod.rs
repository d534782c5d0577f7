// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::params;
use crate::platform::{FakeSpawner, LaunchError, RawOutput, SpawnEvent};
use crate::{Encoding, Output, SpawnOptions};
use serde_json::json;


fn runner() -> (Runner<FakeSpawner>, FakeSpawner) {
    let fake = FakeSpawner::new();
    (Runner::with_spawner(fake.clone()), fake)
}

fn not_found(command: &str) -> LaunchError {
    LaunchError::new(command, &std::io::Error::from(std::io::ErrorKind::NotFound))
}

fn out(s: &str) -> SpawnEvent {
    SpawnEvent::Stdout(s.as_bytes().to_vec())
}

fn err(s: &str) -> SpawnEvent {
    SpawnEvent::Stderr(s.as_bytes().to_vec())
}

fn exit(code: i32) -> SpawnEvent {
    SpawnEvent::Exit { code: Some(code), signal: None }
}

// ---------------------------------------------------------------------------
// Blocking runner
// ---------------------------------------------------------------------------

#[test]
fn sync_invalid_params_never_spawn() {
    let (runner, fake) = runner();

    let error = runner.sync(params![]).unwrap_err();
    assert_eq!(error.to_string(), "The command to execute is missing.");
    let error = runner.sync(params![json!({}), "args"]).unwrap_err();
    assert_eq!(error.to_string(), "The command to execute should be a string, not an Object.");
    assert!(matches!(error, SpawnError::Normalize(_)));

    assert!(fake.calls().is_empty());
}

#[test]
fn sync_records_the_call() {
    let (runner, fake) = runner();
    fake.push_raw(RawOutput {
        pid: Some(99),
        stdout: b"Argument #1: --foo\n".to_vec(),
        status: Some(0),
        ..RawOutput::default()
    });

    let process = runner.sync("echo-args --foo").unwrap();
    assert_eq!(process.pid, Some(99));
    assert_eq!(process.stdout, "Argument #1: --foo\n");
    assert_eq!(process.stderr, "");
    assert_eq!(process.output, "Argument #1: --foo\n");

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "echo-args");
    assert_eq!(calls[0].args, ["--foo"]);
    assert!(calls[0].blocking);
}

#[test]
fn sync_nonzero_exit_fails_with_stderr() {
    let (runner, fake) = runner();
    fake.push_raw(RawOutput {
        pid: Some(5),
        stderr: b"Onoes!!!\n".to_vec(),
        status: Some(1),
        ..RawOutput::default()
    });

    let error = runner.sync(params!["exit-code", ["1", "Onoes!!!"]]).unwrap_err();
    assert_eq!(error.to_string(), "exit-code 1 Onoes!!! exited with a status of 1.\n\nOnoes!!!");
    let process = error.process().unwrap();
    assert_eq!(process.exit_code, Some(1));
    assert_eq!(process.stderr, "Onoes!!!\n");
}

#[test]
fn sync_launch_error_is_returned_on_the_record() {
    let (runner, fake) = runner();
    fake.push_raw(RawOutput::launch_failure(not_found("nope")));

    let process = runner.sync("nope").unwrap();
    assert_eq!(process.pid, None);
    assert_eq!(process.exit_code, None);
    assert_eq!(process.error.map(|e| e.kind), Some(std::io::ErrorKind::NotFound));
}

#[test]
fn sync_signal_death_is_not_a_failure() {
    let (runner, fake) = runner();
    fake.push_raw(RawOutput {
        pid: Some(5),
        signal: Some("SIGTERM".into()),
        ..RawOutput::default()
    });

    let process = runner.sync("sleep 10").unwrap();
    assert_eq!(process.exit_code, None);
    assert_eq!(process.signal.as_deref(), Some("SIGTERM"));
}

#[test]
fn sync_passes_options_through() {
    let (runner, fake) = runner();
    runner
        .sync(params!["echo-args", json!({ "cwd": "/tmp", "detached": true })])
        .unwrap();

    let options = &fake.calls()[0].options;
    assert_eq!(options.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    assert_eq!(options.extra.get("detached"), Some(&json!(true)));
}

#[test]
fn sync_buffer_encoding_keeps_bytes() {
    let (runner, fake) = runner();
    fake.push_raw(RawOutput {
        pid: Some(1),
        stdout: vec![0, 255],
        stderr: vec![1],
        status: Some(0),
        ..RawOutput::default()
    });

    let process = runner
        .sync(params!["cat", SpawnOptions::new().encoding(Encoding::Buffer)])
        .unwrap();
    assert_eq!(process.stdout, vec![0u8, 255]);
    assert_eq!(process.output, vec![0u8, 255, 1]);
}

// ---------------------------------------------------------------------------
// Async runner
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_invalid_params_never_spawn() {
    let (runner, fake) = runner();

    let error = runner.run(params!["echo-args", ["--foo", "--bar"], json!({ "timeout": "x" })]).await;
    assert!(matches!(error, Err(SpawnError::Normalize(_))));
    let error = runner.run("").await.unwrap_err();
    assert_eq!(error.to_string(), "The command to execute is missing.");

    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn run_interleaves_output_in_arrival_order() {
    let (runner, fake) = runner();
    fake.push_events(Some(7), vec![out("a"), err("b"), out("c"), exit(0)]);

    let process = runner.run("prog").await.unwrap();
    assert_eq!(process.pid, Some(7));
    assert_eq!(process.stdout, "ac");
    assert_eq!(process.stderr, "b");
    assert_eq!(process.output, "abc");
    assert_eq!(process.exit_code, Some(0));
    assert!(!fake.calls()[0].blocking);
}

#[tokio::test]
async fn run_resolves_on_nonzero_exit() {
    let (runner, fake) = runner();
    fake.push_events(Some(7), vec![err("Onoes!!!\n"), exit(1)]);

    let process = runner.run("exit-code 1").await.unwrap();
    assert_eq!(process.exit_code, Some(1));

    let error = process.check().unwrap_err();
    assert_eq!(error.message(), "exit-code 1 exited with a status of 1.\n\nOnoes!!!");
}

#[tokio::test]
async fn run_launch_error_finalizes() {
    let (runner, fake) = runner();
    fake.push_events(None, vec![SpawnEvent::Error(not_found("nope"))]);

    let process = runner.run("nope --x").await.unwrap();
    assert_eq!(process.args, ["--x"]);
    assert!(process.error.is_some());
    assert_eq!(process.exit_code, None);
    assert_eq!(process.output, "");
}

#[tokio::test]
async fn run_ignores_events_after_exit() {
    let (runner, fake) = runner();
    fake.push_events(Some(1), vec![out("x"), exit(0), out("late")]);

    let process = runner.run("prog").await.unwrap();
    assert_eq!(process.stdout, "x");
}

#[tokio::test]
async fn run_closed_channel_finalizes_as_is() {
    let (runner, fake) = runner();
    fake.push_events(Some(1), vec![out("partial")]);

    let process = runner.run("prog").await.unwrap();
    assert_eq!(process.stdout, "partial");
    assert_eq!(process.exit_code, None);
    assert_eq!(process.error, None);
}

#[tokio::test]
async fn run_joins_utf8_split_across_chunks() {
    let (runner, fake) = runner();
    let bytes = "é€".as_bytes();
    fake.push_events(
        Some(1),
        vec![
            SpawnEvent::Stdout(bytes[..1].to_vec()),
            SpawnEvent::Stdout(bytes[1..3].to_vec()),
            SpawnEvent::Stdout(bytes[3..].to_vec()),
            exit(0),
        ],
    );

    let process = runner.run("prog").await.unwrap();
    assert_eq!(process.stdout, "é€");
}

#[tokio::test]
async fn run_buffer_encoding_yields_bytes() {
    let (runner, fake) = runner();
    fake.push_events(
        Some(1),
        vec![SpawnEvent::Stdout(vec![0xff]), SpawnEvent::Stderr(vec![0x00]), exit(0)],
    );

    let process = runner
        .run(params!["prog", json!({ "encoding": "buffer" })])
        .await
        .unwrap();
    assert_eq!(process.stdout, Output::Bytes(vec![0xff]));
    assert_eq!(process.stderr, Output::Bytes(vec![0x00]));
    assert_eq!(process.output, Output::Bytes(vec![0xff, 0x00]));
}

#[tokio::test]
async fn run_without_output_has_empty_streams() {
    let (runner, _fake) = runner();

    let process = runner.run(params!["prog", Vec::<String>::new()]).await.unwrap();
    assert!(process.args.is_empty());
    assert_eq!(process.stdout, "");
    assert_eq!(process.stderr, "");
    assert_eq!(process.output, "");
    assert!(process.is_success());
}
