// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command contract

use crate::RetryPolicy;
use async_trait::async_trait;
use indexmap::IndexMap;
use mr_adapters::{GitAdapter, GitError};
use mr_config::ConfigError;
use mr_core::{Logs, RepositoryInfo, Task, TaskResult, ToolOptions};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by command logic.
///
/// [`CommandError::Reported`] is already result-shaped and is forwarded
/// unchanged; every other variant becomes a result with a single error line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{}", .0.logs.error.join("\n"))]
    Reported(TaskResult),
    #[error(transparent)]
    Git(#[from] GitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Shell(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub fn into_result(self) -> TaskResult {
        match self {
            CommandError::Reported(result) => result,
            other => TaskResult::error(other.to_string()),
        }
    }
}

/// Adapters and policies available to command logic inside a worker.
#[derive(Clone)]
pub struct CommandContext {
    pub git: Arc<dyn GitAdapter>,
    pub retry: RetryPolicy,
}

impl CommandContext {
    pub fn new(git: Arc<dyn GitAdapter>) -> Self {
        Self {
            git,
            retry: RetryPolicy::from_env(),
        }
    }
}

/// Logic for one command, run once per repository.
///
/// `before_execute` and `after_execute` run in the orchestrating process,
/// once per run; `execute` runs inside a worker for each task.
#[async_trait]
pub trait Command: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// One-line description for help output
    fn about(&self) -> &'static str;

    /// Whether the hosting repository is queued as a root pseudo-package
    fn supports_root(&self) -> bool {
        false
    }

    /// Validate arguments before any worker starts. An error aborts the run.
    fn before_execute(&self, _args: &[String], _options: &ToolOptions) -> Result<(), CommandError> {
        Ok(())
    }

    async fn execute(&self, task: &Task, ctx: &CommandContext) -> Result<TaskResult, CommandError>;

    /// Post-run hook over every processed package and collected response.
    fn after_execute(
        &self,
        _processed: &BTreeSet<String>,
        _responses: &IndexMap<String, serde_json::Value>,
        _options: &ToolOptions,
    ) -> Result<Logs, CommandError> {
        Ok(Logs::default())
    }
}

/// The task's resolved repository.
///
/// Workers never hand unresolved tasks to commands, so a missing repository
/// here is reported as an ordinary command error.
pub fn repository(task: &Task) -> Result<&RepositoryInfo, CommandError> {
    task.repository.as_ref().ok_or_else(|| {
        CommandError::Invalid(format!(
            "repository of \"{}\" is not resolved",
            task.package_name
        ))
    })
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
