// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::params;
use serde_json::json;

fn message(params: Vec<Param>) -> String {
    normalize(params).unwrap_err().to_string()
}

#[yare::parameterized(
    no_params    = { params![] },
    empty_string = { params![""] },
    blank_string = { params!["   "] },
    empty_argv   = { params![Vec::<String>::new()] },
    blank_argv   = { params![[" "], "x"] },
    blank_list_cmd = { params!["  ", ["x"]] },
)]
fn missing_command(params: Vec<Param>) {
    assert_eq!(message(params), "The command to execute is missing.");
}

#[yare::parameterized(
    object  = { params![json!({}), "args"], "an Object" },
    number  = { params![42, "args"], "a Number" },
    boolean = { params![false], "a Boolean" },
    null    = { params![json!(null), "args"], "a Null" },
    argv_object = { params![[json!({})]], "an Object" },
)]
fn command_not_a_string(params: Vec<Param>, noun: &str) {
    assert_eq!(
        message(params),
        format!("The command to execute should be a string, not {noun}.")
    );
}

#[test]
fn argument_object_in_list() {
    assert_eq!(
        message(params!["echo-args", [json!("--foo"), json!({})]]),
        "The command arguments should be strings, but argument #2 is an Object."
    );
}

#[test]
fn argument_number_in_variadic() {
    assert_eq!(
        message(params!["echo-args", "a", 7, "b"]),
        "The command arguments should be strings, but argument #2 is a Number."
    );
}

#[test]
fn argument_array_in_variadic() {
    assert_eq!(
        message(params!["echo-args", "a", ["b"]]),
        "The command arguments should be strings, but argument #2 is an Array."
    );
}

#[test]
fn argument_position_spans_argv_and_trailing_params() {
    assert_eq!(
        message(params![["echo-args", "a"], "b", true]),
        "The command arguments should be strings, but argument #3 is a Boolean."
    );
}

#[test]
fn invalid_options_object() {
    let err = normalize(params!["echo-args", json!({ "timeout": "soon" })]).unwrap_err();
    assert!(matches!(err.kind, NormalizeErrorKind::InvalidOptions { .. }));
    assert!(err.to_string().starts_with("The options are invalid: "));
}

#[test]
fn error_carries_rendered_params() {
    let err = normalize(params!["echo-args", [json!("--foo"), json!({ "a": 1 })]]).unwrap_err();
    assert_eq!(err.command, "echo-args");
    assert_eq!(err.args, [r#"["--foo",{"a":1}]"#]);

    let err = normalize(params![[json!("cmd"), json!(5)]]).unwrap_err();
    assert_eq!(err.command, "cmd");
    assert_eq!(err.args, ["5"]);
}
