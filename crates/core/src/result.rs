// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task results

use serde::{Deserialize, Serialize};

/// Ordered log lines produced by one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logs {
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub error: Vec<String>,
}

impl Logs {
    pub fn is_empty(&self) -> bool {
        self.info.is_empty() && self.error.is_empty()
    }

    /// True when any error entry is non-empty.
    pub fn has_errors(&self) -> bool {
        self.error.iter().any(|line| !line.is_empty())
    }
}

/// Outcome of one task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub logs: Logs,
    /// Opaque payload for the command's post-run hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    /// Transitive dependencies discovered while running the task
    #[serde(default, rename = "packages", skip_serializing_if = "Vec::is_empty")]
    pub discovered_packages: Vec<String>,
}

impl TaskResult {
    /// A result carrying a single info line.
    pub fn info(message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.logs.info.push(message.into());
        result
    }

    /// A result carrying a single error line.
    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.logs.error.push(message.into());
        result
    }

    pub fn with_response(mut self, response: serde_json::Value) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discovered_packages
            .extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn is_failure(&self) -> bool {
        self.logs.has_errors()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
