// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

mod errors;
mod properties;
mod shapes;

/// Normalize and return just `(command, args)`.
fn argv(params: Vec<Param>) -> (String, Vec<String>) {
    let invocation = normalize(params).unwrap();
    (invocation.command, invocation.args)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn param_type_names() {
    assert_eq!(Param::from("x").type_name(), "String");
    assert_eq!(Param::from(["x"]).type_name(), "Array");
    assert_eq!(Param::from(SpawnOptions::new()).type_name(), "Object");
    assert_eq!(Param::from(serde_json::json!({})).type_name(), "Object");
    assert_eq!(Param::from(42).type_name(), "Number");
    assert_eq!(Param::from(1.5).type_name(), "Number");
    assert_eq!(Param::from(true).type_name(), "Boolean");
    assert_eq!(Param::from(None::<&str>).type_name(), "Null");
}

#[test]
fn json_values_map_onto_params() {
    let param = Param::from(serde_json::json!(["a", 1, null, { "k": true }]));
    let Param::List(items) = param else {
        panic!("expected a list");
    };
    assert_eq!(items[0], Param::Str("a".into()));
    assert_eq!(items[1].type_name(), "Number");
    assert_eq!(items[2], Param::Null);
    assert_eq!(items[3].type_name(), "Object");
}

#[test]
fn render_uses_compact_json() {
    assert_eq!(Param::from("plain").render(), "plain");
    assert_eq!(Param::from(serde_json::json!({ "a": 1 })).render(), r#"{"a":1}"#);
    assert_eq!(Param::from(vec!["x", "y"]).render(), r#"["x","y"]"#);
}

#[test]
fn invocation_spec_conversions() {
    let owned = String::from("ls -l");
    assert_eq!(InvocationSpec::from("ls -l"), InvocationSpec::from(owned.clone()));
    assert_eq!(InvocationSpec::from(&owned).0, vec![Param::Str("ls -l".into())]);
    assert_eq!(InvocationSpec::from(crate::params!["ls"]).0.len(), 1);
}
