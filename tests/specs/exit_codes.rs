//! Exit code specs
//!
//! Verify how each runner reports zero and non-zero exits.

use crate::prelude::*;

#[test]
fn zero_exit_returns_the_record() {
    for mode in MODES {
        let process = mode.spawn(format!("{EXIT_CODE} 0")).unwrap();
        assert_eq!(process.to_string(), format!("{EXIT_CODE} 0"));
        assert_eq!(process.command, EXIT_CODE);
        assert_eq!(process.status(), Some(0));
        assert_eq!(process.signal, None);
        assert_eq!(process.error, None);
        assert_eq!(process.stdout, "Process was exited with code 0\n");
        assert_eq!(process.stderr, "");
    }
}

#[test]
fn nonzero_exit_without_stderr() {
    for mode in MODES {
        let error = mode.spawn(format!("{EXIT_CODE} 1 --silent")).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("{EXIT_CODE} 1 --silent exited with a status of 1.")
        );

        let process = error.process().unwrap();
        assert_eq!(process.command, EXIT_CODE);
        assert_eq!(process.exit_code, Some(1));
        assert_eq!(process.signal, None);
        assert_eq!(process.stdout, "");
        assert_eq!(process.stderr, "");
    }
}

#[test]
fn nonzero_exit_with_stderr() {
    for mode in MODES {
        let error = mode.spawn(format!("{EXIT_CODE} 1 \"Onoes!!!\"")).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("{EXIT_CODE} 1 Onoes!!! exited with a status of 1.\n\nOnoes!!!")
        );
        assert_eq!(error.process().unwrap().stderr, "Onoes!!!\n");
    }
}

#[test]
fn exit_status_above_128() {
    for mode in MODES {
        let error = mode.spawn(format!("{EXIT_CODE} 150")).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!(
                "{EXIT_CODE} 150 exited with a status of 150.\n\nProcess was exited with code 150"
            )
        );
        let process = error.process().unwrap();
        assert_eq!(process.exit_code, Some(150));
        assert_eq!(process.stderr, "Process was exited with code 150\n");
    }
}

#[test]
fn async_modes_resolve_nonzero_exits() {
    for mode in [Mode::Async, Mode::Callback] {
        let process = mode.spawn_raw(format!("{EXIT_CODE} 2 --silent")).unwrap();
        assert_eq!(process.exit_code, Some(2));
        assert!(!process.is_success());
    }
    assert!(Mode::Sync.spawn_raw(format!("{EXIT_CODE} 2 --silent")).is_err());
}
