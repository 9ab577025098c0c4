// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal output for a run

use std::io::Write;

use mr_core::{format_duration, Logs, PackageRef, Progress};
use mr_engine::{Reporter, RunSummary};

use crate::color;

/// Prints each package's logs under a `[done/total] <package>` header.
pub struct TerminalReporter<W> {
    out: W,
    colorize: bool,
}

impl TerminalReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), color::should_colorize())
    }
}

impl<W: Write + Send> TerminalReporter<W> {
    pub fn new(out: W, colorize: bool) -> Self {
        Self { out, colorize }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&self, text: &str) -> String {
        if self.colorize {
            color::apply_header(text)
        } else {
            text.to_string()
        }
    }

    fn context(&self, text: &str) -> String {
        if self.colorize {
            color::apply_context(text)
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.colorize {
            color::apply_red(text)
        } else {
            text.to_string()
        }
    }

    fn write_logs(&mut self, logs: &Logs) {
        for line in logs.info.iter().flat_map(|entry| entry.lines()) {
            let _ = writeln!(self.out, "{}", line);
        }
        for line in logs.error.iter().flat_map(|entry| entry.lines()) {
            let line = self.red(line);
            let _ = writeln!(self.out, "{}", line);
        }
    }
}

impl<W: Write + Send> Reporter for TerminalReporter<W> {
    fn on_result(&mut self, package: &PackageRef, logs: &Logs, progress: Progress) {
        let header = self.header(&format!("[{}] {}", progress, package));
        let _ = writeln!(self.out, "{}", header);
        self.write_logs(logs);
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        self.write_logs(&summary.post_run);

        let elapsed = self.context(&format!(
            "Execution time: {}",
            format_duration(summary.elapsed)
        ));
        let _ = writeln!(self.out, "{}", elapsed);

        if !summary.failed.is_empty() {
            let names: Vec<&str> = summary.failed.iter().map(String::as_str).collect();
            let line = self.red(&format!("Failed packages: {}", names.join(", ")));
            let _ = writeln!(self.out, "{}", line);
        }
        let _ = self.out.flush();
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
