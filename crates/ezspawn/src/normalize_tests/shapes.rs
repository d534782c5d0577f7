// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::params;
use serde_json::json;

#[test]
fn combined_string_is_tokenized() {
    let (command, args) = argv(params!["echo-args --foo --bar=\"baz\""]);
    assert_eq!(command, "echo-args");
    assert_eq!(args, ["--foo", "--bar=\"baz\""]);
}

#[test]
fn combined_without_args() {
    let (command, args) = argv(params!["echo-args"]);
    assert_eq!(command, "echo-args");
    assert!(args.is_empty());
}

#[test]
fn quoted_command_with_spaces() {
    let (command, args) = argv(params!["\"bin/spaces in name\" --x"]);
    assert_eq!(command, "bin/spaces in name");
    assert_eq!(args, ["--x"]);
}

#[test]
fn command_with_arg_string_tokenizes_args() {
    let (command, args) = argv(params!["echo-args", "--foo=\"bar baz\" \"bip bop\""]);
    assert_eq!(command, "echo-args");
    assert_eq!(args, ["--foo=\"bar baz\"", "bip bop"]);
}

#[test]
fn command_with_arg_string_keeps_command_verbatim() {
    let (command, args) = argv(params!["bin/spaces in name", "--foo --bar"]);
    assert_eq!(command, "bin/spaces in name");
    assert_eq!(args, ["--foo", "--bar"]);
}

#[test]
fn command_with_arg_list_is_verbatim() {
    let (command, args) = argv(params!["bin/spaces in name", ["a b", "\"c\""]]);
    assert_eq!(command, "bin/spaces in name");
    assert_eq!(args, ["a b", "\"c\""]);
}

#[test]
fn variadic_args_are_verbatim() {
    let (command, args) = argv(params!["echo-args", "a b", "c"]);
    assert_eq!(command, "echo-args");
    assert_eq!(args, ["a b", "c"]);
}

#[test]
fn argv_list_with_trailing_args() {
    let (command, args) = argv(params![["echo-args", "a"], "b c"]);
    assert_eq!(command, "echo-args");
    assert_eq!(args, ["a", "b c"]);
}

#[test]
fn empty_arg_list() {
    let (command, args) = argv(params!["echo-args", Vec::<String>::new()]);
    assert_eq!(command, "echo-args");
    assert!(args.is_empty());
}

#[yare::parameterized(
    combined   = { params!["a b"], Shape::Combined("a b".into()) },
    arg_string = { params!["a", "b c"], Shape::CommandWithArgString { command: "a".into(), args: "b c".into() } },
    arg_list   = { params!["a", ["b"]], Shape::CommandWithArgList { command: "a".into(), args: params!["b"] } },
    variadic   = { params!["a", "b", "c"], Shape::Variadic { command: "a".into(), args: params!["b", "c"] } },
    variadic_1 = { params!["a", 5], Shape::Variadic { command: "a".into(), args: params![5] } },
    argv       = { params![["a", "b"], "c"], Shape::Argv(params!["a", "b", "c"]) },
)]
fn detect_shape(params: Vec<Param>, expected: Shape) {
    assert_eq!(Shape::detect(params).unwrap(), expected);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn trailing_options_are_split_off() {
    let invocation =
        normalize(params!["echo-args", ["a"], SpawnOptions::new().cwd("/tmp")]).unwrap();
    assert_eq!(invocation.args, ["a"]);
    assert_eq!(invocation.options.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
}

#[test]
fn trailing_json_object_becomes_options() {
    let invocation =
        normalize(params!["echo-args a", json!({ "encoding": "buffer", "maxBuffer": 16 })])
            .unwrap();
    assert_eq!(invocation.args, ["a"]);
    assert_eq!(invocation.options.resolved_encoding(), crate::Encoding::Buffer);
    assert_eq!(invocation.options.max_buffer, Some(16));
}

#[test]
fn options_after_variadic_args() {
    let invocation = normalize(params!["echo-args", "a", "b", json!({ "cwd": "/" })]).unwrap();
    assert_eq!(invocation.args, ["a", "b"]);
    assert!(invocation.options.cwd.is_some());
}

#[test]
fn missing_options_default() {
    let invocation = normalize("echo-args").unwrap();
    assert_eq!(invocation.options, SpawnOptions::default());
}

#[test]
fn lone_object_is_not_options() {
    let err = normalize(params![json!({ "cwd": "/" })]).unwrap_err();
    assert_eq!(
        err.kind,
        NormalizeErrorKind::CommandNotString { type_name: "Object" }
    );
}
