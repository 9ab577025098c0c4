// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `save`: pin every dependency to its current commit in the config file

use crate::command::{repository, Command, CommandContext, CommandError};
use async_trait::async_trait;
use indexmap::IndexMap;
use mr_core::{Logs, ShortId, Task, TaskResult, ToolOptions};
use serde_json::{json, Value};
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, Copy)]
pub struct SaveCommand;

#[async_trait]
impl Command for SaveCommand {
    fn name(&self) -> &'static str {
        "save"
    }

    fn about(&self) -> &'static str {
        "Pin dependencies to their checked-out commits in mr.json"
    }

    async fn execute(&self, task: &Task, ctx: &CommandContext) -> Result<TaskResult, CommandError> {
        let repo = repository(task)?;
        if !repo.directory.is_dir() {
            return Ok(TaskResult::info("Not cloned yet, nothing to save."));
        }
        let commit = ctx.git.head_commit(&repo.directory).await?;
        Ok(TaskResult::info(format!("Commit: {}", commit.short(10)))
            .with_response(json!({ "commit": commit })))
    }

    fn after_execute(
        &self,
        _processed: &BTreeSet<String>,
        responses: &IndexMap<String, Value>,
        options: &ToolOptions,
    ) -> Result<Logs, CommandError> {
        let revisions: IndexMap<String, String> = responses
            .iter()
            .filter_map(|(name, response)| {
                let commit = response.get("commit")?.as_str()?;
                Some((name.clone(), commit.to_string()))
            })
            .collect();

        let mut logs = Logs::default();
        let Some(config_path) = options.config_path.as_deref() else {
            logs.error
                .push("no config file to save revisions to".to_string());
            return Ok(logs);
        };
        if revisions.is_empty() {
            logs.info.push("Nothing to save.".to_string());
            return Ok(logs);
        }

        let pinned = mr_config::pin_dependencies(config_path, &revisions)?;
        logs.info.push(format!(
            "Saved {} revision(s) to {}.",
            pinned,
            config_path.display()
        ));
        Ok(logs)
    }
}

#[cfg(test)]
#[path = "save_tests.rs"]
mod tests;
