// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `echo-file [--stdout] <files...> [--stderr <files...>]`
//!
//! Copies each file byte-for-byte to the currently selected stream
//! (stdout until `--stderr` is seen).

use std::io::Write;

fn main() -> std::io::Result<()> {
    let mut to_stderr = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--stdout" => to_stderr = false,
            "--stderr" => to_stderr = true,
            path => {
                let bytes = std::fs::read(path)?;
                if to_stderr {
                    std::io::stderr().write_all(&bytes)?;
                } else {
                    std::io::stdout().write_all(&bytes)?;
                }
            }
        }
    }
    Ok(())
}
