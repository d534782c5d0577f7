//! Error specs
//!
//! Verify invalid parameters and launch failures.

use crate::prelude::*;

#[test]
fn missing_command() {
    for mode in MODES {
        let error = mode.spawn(params![]).unwrap_err();
        assert_eq!(error.to_string(), "The command to execute is missing.");

        let error = mode.spawn("").unwrap_err();
        assert_eq!(error.to_string(), "The command to execute is missing.");
        assert!(matches!(error, SpawnError::Normalize(_)));
    }
}

#[test]
fn command_is_not_a_string() {
    for mode in MODES {
        let error = mode.spawn(params![json!({}), "args"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "The command to execute should be a string, not an Object."
        );
    }
}

#[test]
fn argument_is_not_a_string() {
    for mode in MODES {
        let error = mode.spawn(params![ECHO_ARGS, [json!("--foo"), json!({})]]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "The command arguments should be strings, but argument #2 is an Object."
        );
        assert_eq!(error.command(), ECHO_ARGS);
    }
}

#[test]
fn missing_program_sets_launch_error() {
    let files = Files::new();
    let missing = files.path("wrong-command").to_string_lossy().into_owned();

    for mode in MODES {
        let process = mode.spawn(missing.as_str()).unwrap();
        let error = process.error.as_ref().unwrap();
        assert_eq!(error.kind, std::io::ErrorKind::NotFound);
        assert!(error.to_string().contains(&missing), "{error}");
        assert_eq!(process.pid, None);
        assert_eq!(process.exit_code, None);
        assert_eq!(process.stdout, "");
    }
}

#[test]
fn non_executable_file_sets_launch_error() {
    let files = Files::new();
    let text_file = files.write("text-file", "not a program\n");

    for mode in MODES {
        let process = mode.spawn(text_file.as_str()).unwrap();
        assert!(process.error.is_some(), "{mode:?}");
        assert_eq!(process.exit_code, None);
    }
}
