// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merging per-package results into the run outcome

use std::collections::BTreeSet;
use std::time::Duration;

use indexmap::IndexMap;
use mr_core::{Logs, TaskResult};
use serde_json::Value;

/// Collects results in completion order.
#[derive(Debug, Default)]
pub struct Aggregator {
    processed: BTreeSet<String>,
    failed: BTreeSet<String>,
    responses: IndexMap<String, Value>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one package's result. Any non-empty error entry fails the package.
    pub fn merge(&mut self, package: &str, result: &TaskResult) {
        self.processed.insert(package.to_string());
        if result.is_failure() {
            self.failed.insert(package.to_string());
        }
        if let Some(response) = &result.response {
            self.responses.insert(package.to_string(), response.clone());
        }
    }

    pub fn processed(&self) -> &BTreeSet<String> {
        &self.processed
    }

    pub fn responses(&self) -> &IndexMap<String, Value> {
        &self.responses
    }

    pub fn failed(&self) -> &BTreeSet<String> {
        &self.failed
    }

    pub fn finish(self, post_run: Logs, elapsed: Duration) -> RunSummary {
        RunSummary {
            processed: self.processed,
            failed: self.failed,
            responses: self.responses,
            post_run,
            elapsed,
        }
    }
}

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub processed: BTreeSet<String>,
    pub failed: BTreeSet<String>,
    pub responses: IndexMap<String, Value>,
    /// Output of the command's post-run hook
    pub post_run: Logs,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.post_run.has_errors()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
