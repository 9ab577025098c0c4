// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers
//!
//! Every command runs with an explicit working directory; the calling
//! process never changes its own.

use std::path::Path;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Run a subprocess to completion, capturing stdout and stderr.
///
/// A non-zero exit status is not an error here; only failing to spawn or
/// wait on the process is. The error is a descriptive message prefixed
/// with `description`.
pub async fn run_captured(mut cmd: Command, description: &str) -> Result<Output, String> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd.output()
        .await
        .map_err(|io_err| format!("{} failed: {}", description, io_err))
}

/// Run `script` with `sh -c` inside `cwd`.
pub async fn run_shell(cwd: &Path, script: &str) -> Result<Output, String> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script).current_dir(cwd);
    run_captured(cmd, &format!("sh -c '{}'", script)).await
}

/// Lossy, trimmed UTF-8 text of a captured stream.
pub fn output_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
