// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn command_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_./-]{0,10}"
}

fn args_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9_=./:-]{1,8}", 0..6)
}

/// Commands that may contain spaces; not expressible as one combined string.
fn spaced_command_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_./-]{0,6}( [a-z0-9_./-]{1,6}){1,2}"
}

proptest! {
    /// Invariant: every shape naming the same argv normalizes identically.
    #[test]
    fn shapes_agree(command in command_strategy(), args in args_strategy()) {
        let expected = (command.clone(), args.clone());
        let joined = args.join(" ");

        let combined = vec![Param::from(format!("{command} {joined}"))];
        let arg_string = vec![Param::from(&command), Param::from(joined.clone())];
        let arg_list = vec![Param::from(&command), Param::from(args.clone())];
        let variadic: Vec<Param> = std::iter::once(&command).chain(&args).map(Param::from).collect();
        let argv_list = vec![Param::from(variadic.clone())];

        for params in [combined, arg_string, arg_list, variadic, argv_list] {
            prop_assert_eq!(argv(params), expected.clone());
        }
    }

    /// Invariant: shapes that take the command as its own param keep its
    /// spaces.
    #[test]
    fn spaced_command_shapes_agree(command in spaced_command_strategy(), args in args_strategy()) {
        let expected = (command.clone(), args.clone());

        let arg_string = vec![Param::from(&command), Param::from(args.join(" "))];
        let arg_list = vec![Param::from(&command), Param::from(args.clone())];
        let variadic: Vec<Param> = std::iter::once(&command).chain(&args).map(Param::from).collect();
        let argv_list = vec![Param::from(variadic.clone())];
        let combined = vec![Param::from(format!("\"{command}\" {}", args.join(" ")))];

        for params in [arg_string, arg_list, variadic, argv_list, combined] {
            prop_assert_eq!(argv(params), expected.clone());
        }
    }

    /// Invariant: trailing options never change the command or arguments.
    #[test]
    fn options_do_not_affect_argv(command in command_strategy(), args in args_strategy()) {
        let plain = vec![Param::from(&command), Param::from(args.clone())];
        let mut with_options = plain.clone();
        with_options.push(Param::from(SpawnOptions::new().cwd("/")));

        prop_assert_eq!(argv(plain), argv(with_options));
    }

    /// Invariant: a non-string at any argument position is reported at
    /// that 1-based position.
    #[test]
    fn bad_argument_position(args in args_strategy(), at in 0usize..6) {
        let at = at.min(args.len());
        let mut list: Vec<Param> = args.iter().map(Param::from).collect();
        list.insert(at, Param::from(1));

        let err = normalize(vec![Param::from("cmd"), Param::List(list)]).unwrap_err();
        prop_assert_eq!(
            err.kind,
            NormalizeErrorKind::ArgNotString { position: at + 1, type_name: "Number" }
        );
    }
}

#[test]
fn arg_list_preserves_order() {
    assert_eq!(argv(crate::params!["a", ["b", "c"]]).1, owned(&["b", "c"]));
}
