// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `status`: report branch, commit and cleanliness of each working copy

use crate::command::{repository, Command, CommandContext, CommandError};
use async_trait::async_trait;
use mr_core::{ShortId, Task, TaskResult};
use serde_json::json;

#[derive(Debug, Default, Clone, Copy)]
pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn about(&self) -> &'static str {
        "Show branch, commit and local changes of every repository"
    }

    fn supports_root(&self) -> bool {
        true
    }

    async fn execute(&self, task: &Task, ctx: &CommandContext) -> Result<TaskResult, CommandError> {
        let repo = repository(task)?;
        if !repo.directory.is_dir() {
            return Ok(TaskResult::info("Not cloned yet."));
        }

        let git = &ctx.git;
        let branch = git.current_branch(&repo.directory).await?;
        let commit = git.head_commit(&repo.directory).await?;
        let clean = git.is_clean(&repo.directory).await?;

        let line = format!(
            "{} at {}{}",
            branch.as_deref().unwrap_or("(detached)"),
            commit.short(10),
            if clean { "" } else { ", uncommitted changes" }
        );
        Ok(TaskResult::info(line).with_response(json!({
            "branch": branch,
            "commit": commit,
            "clean": clean,
        })))
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
