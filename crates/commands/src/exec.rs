// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `exec`: run a shell command in every repository

use crate::command::{repository, Command, CommandContext, CommandError};
use async_trait::async_trait;
use mr_adapters::subprocess::{output_text, run_shell};
use mr_core::{Task, TaskResult, ToolOptions};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExecCommand;

#[async_trait]
impl Command for ExecCommand {
    fn name(&self) -> &'static str {
        "exec"
    }

    fn about(&self) -> &'static str {
        "Run a shell command in every repository"
    }

    fn supports_root(&self) -> bool {
        true
    }

    fn before_execute(&self, args: &[String], _options: &ToolOptions) -> Result<(), CommandError> {
        if args.iter().all(|arg| arg.trim().is_empty()) {
            return Err(CommandError::Invalid(
                "exec requires a command to run, e.g. `mr exec git status`".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(&self, task: &Task, _ctx: &CommandContext) -> Result<TaskResult, CommandError> {
        let repo = repository(task)?;
        if !repo.directory.is_dir() {
            return Err(CommandError::Invalid(format!(
                "{} does not exist; run `mr sync` first",
                repo.directory.display()
            )));
        }

        let script = task.arguments.join(" ");
        let output = run_shell(&repo.directory, &script)
            .await
            .map_err(CommandError::Shell)?;

        let stdout = output_text(&output.stdout);
        let stderr = output_text(&output.stderr);
        let mut result = TaskResult::default();
        if !stdout.is_empty() {
            result.logs.info.push(stdout);
        }

        if output.status.success() {
            // Tools like git report progress on stderr even when they succeed
            if !stderr.is_empty() {
                result.logs.info.push(stderr);
            }
            return Ok(result);
        }

        let error = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("`{}` exited with status {}", script, code),
                None => format!("`{}` was terminated by a signal", script),
            }
        } else {
            stderr
        };
        result.logs.error.push(error);
        Err(CommandError::Reported(result))
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
