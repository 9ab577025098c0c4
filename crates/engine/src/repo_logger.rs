// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only logger for per-repository output logs.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use mr_core::Logs;

/// Writes each merged result to `<log_dir>/<package>.log`.
///
/// Each `append()` call opens, writes, and closes the file.
pub struct RepoLogger {
    log_dir: PathBuf,
}

impl RepoLogger {
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    pub fn log_path(&self, package: &str) -> PathBuf {
        self.log_dir.join(format!("{}.log", package))
    }

    /// Append a result's logs, one timestamped line per log line.
    ///
    /// Format: `2026-01-30T08:14:09Z INFO message`
    ///
    /// Failures are logged via tracing but do not propagate.
    pub fn append(&self, package: &str, logs: &Logs) {
        if logs.is_empty() {
            return;
        }
        let path = self.log_path(package);
        if let Err(e) = write_logs(&path, logs) {
            tracing::warn!(
                package,
                path = %path.display(),
                error = %e,
                "failed to write repository log"
            );
        }
    }
}

fn write_logs(path: &Path, logs: &Logs) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let ts = format_utc_now();
    let entries = logs
        .info
        .iter()
        .map(|entry| ("INFO", entry))
        .chain(logs.error.iter().map(|entry| ("ERROR", entry)));
    for (level, entry) in entries {
        for line in entry.lines() {
            writeln!(file, "{} {} {}", ts, level, line)?;
        }
    }
    Ok(())
}

/// Format the current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
fn format_utc_now() -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();

    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;

    let (year, month, day) = days_to_civil(days);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hours, minutes, seconds
    )
}

/// Convert days since Unix epoch to (year, month, day).
///
/// Algorithm from Howard Hinnant's `civil_from_days`.
fn days_to_civil(days: u64) -> (i64, u32, u32) {
    let z = days as i64 + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m as u32, d as u32)
}

#[cfg(test)]
#[path = "repo_logger_tests.rs"]
mod tests;
