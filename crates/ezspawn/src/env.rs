// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! These only supply defaults for options the caller left unset.

use std::path::PathBuf;
use std::time::Duration;

/// Signal sent on timeout or buffer overflow: EZSPAWN_KILL_SIGNAL > SIGTERM
pub fn kill_signal() -> String {
    std::env::var("EZSPAWN_KILL_SIGNAL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "SIGTERM".to_string())
}

/// Per-stream capture cap in bytes (unlimited unless `EZSPAWN_MAX_BUFFER` is set)
pub fn max_buffer() -> Option<usize> {
    std::env::var("EZSPAWN_MAX_BUFFER")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
}

/// Default timeout (none unless `EZSPAWN_TIMEOUT_MS` is set)
pub fn timeout() -> Option<Duration> {
    std::env::var("EZSPAWN_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Shell used for `shell: true`: EZSPAWN_SHELL > platform default
pub fn shell() -> PathBuf {
    if let Ok(shell) = std::env::var("EZSPAWN_SHELL") {
        if !shell.is_empty() {
            return PathBuf::from(shell);
        }
    }
    default_shell()
}

#[cfg(windows)]
fn default_shell() -> PathBuf {
    PathBuf::from("cmd.exe")
}

#[cfg(not(windows))]
fn default_shell() -> PathBuf {
    PathBuf::from("/bin/sh")
}
