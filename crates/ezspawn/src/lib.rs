// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ezspawn: spawn a program, buffer its output, classify how it exited.
//!
//! ```no_run
//! use ezspawn::params;
//!
//! # fn main() -> Result<(), ezspawn::SpawnError> {
//! let process = ezspawn::sync("git commit -am \"fix typo\"")?;
//! println!("{}", process.stdout);
//!
//! let process = ezspawn::sync(params!["ls", ["-l", "-a"]])?;
//! assert_eq!(process.args, ["-l", "-a"]);
//! # Ok(())
//! # }
//! ```

pub mod macros;

pub mod concat;
pub mod env;
pub mod error;
pub mod normalize;
pub mod options;
pub mod output;
pub mod platform;
pub mod process;
pub mod run;
pub mod tokenize;

pub use concat::concat;
pub use error::{NormalizeError, NormalizeErrorKind, ProcessError, SpawnError};
pub use normalize::{normalize, Invocation, InvocationSpec, Param, Shape};
pub use options::{Encoding, Input, Shell, SpawnOptions, Stdio, StdioConfig};
pub use output::Output;
#[cfg(any(test, feature = "test-support"))]
pub use platform::{FakeSpawner, SpawnCall};
pub use platform::{LaunchError, RawOutput, SpawnEvent, SpawnHandle, Spawner, SystemSpawner};
pub use process::Process;
pub use run::{run, run_with_callback, sync, Runner};
