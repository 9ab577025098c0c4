// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sync`: make sure a repository is present and up to date

use crate::command::{repository, Command, CommandContext, CommandError};
use crate::retry::{retry_transient, Attempt};
use async_trait::async_trait;
use mr_adapters::GitError;
use mr_core::{RepositoryInfo, Task, TaskResult, ToolOptions};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct SyncCommand;

#[async_trait]
impl Command for SyncCommand {
    fn name(&self) -> &'static str {
        "sync"
    }

    fn about(&self) -> &'static str {
        "Clone missing repositories and update existing ones"
    }

    fn supports_root(&self) -> bool {
        true
    }

    async fn execute(&self, task: &Task, ctx: &CommandContext) -> Result<TaskResult, CommandError> {
        let repo = repository(task)?;

        let mut result = if task.is_root_repository || repo.directory.exists() {
            update(task, repo, ctx).await?
        } else {
            bootstrap(repo, ctx).await?
        };

        // The root's own dependencies are the seed list, not discoveries
        if task.options.recursive && !task.is_root_repository {
            result = result.with_packages(discover(&repo.directory, &task.options)?);
        }
        Ok(result)
    }
}

/// Clone and check out a missing repository, retrying a transient failure once.
async fn bootstrap(
    repo: &RepositoryInfo,
    ctx: &CommandContext,
) -> Result<TaskResult, CommandError> {
    let git = ctx.git.as_ref();
    let revision = repo.revision();

    let output = retry_transient(&ctx.retry, |attempt| async move {
        if attempt == Attempt::Retry && repo.directory.exists() {
            remove_partial_clone(&repo.directory).await;
        }
        let cloned = git.clone_repo(&repo.url, &repo.directory).await?;
        let checked_out = git.checkout(&repo.directory, revision).await?;
        Ok::<_, GitError>(join_output([cloned, checked_out]))
    })
    .await?;

    let mut result = TaskResult::info(format!("Cloned {} at \"{}\".", repo.url, revision));
    if !output.is_empty() {
        result.logs.info.push(output);
    }
    Ok(result)
}

/// A clone cut off mid-transfer can leave a partial working copy behind.
/// If it cannot be removed the retry still runs and reports its own error.
async fn remove_partial_clone(dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(dir).await {
        tracing::warn!(
            dir = %dir.display(),
            error = %e,
            "could not remove partial clone before retrying"
        );
    }
}

/// Fetch, check out and fast-forward an existing working copy.
///
/// The root repository keeps whatever is checked out and is only pulled.
async fn update(
    task: &Task,
    repo: &RepositoryInfo,
    ctx: &CommandContext,
) -> Result<TaskResult, CommandError> {
    let git = ctx.git.as_ref();
    let dir = &repo.directory;

    let mut outputs = vec![git.fetch(dir).await?];
    if !task.is_root_repository {
        outputs.push(git.checkout(dir, repo.revision()).await?);
    }

    let message = match git.current_branch(dir).await? {
        Some(branch) => {
            outputs.push(git.pull(dir, &branch).await?);
            format!("Updated \"{}\".", branch)
        }
        None => format!("Checked out \"{}\" (detached).", repo.revision()),
    };

    let mut result = TaskResult::info(message);
    let output = join_output(outputs);
    if !output.is_empty() {
        result.logs.info.push(output);
    }
    Ok(result)
}

/// Dependencies of the synced repository that the hosting config also declares.
fn discover(dir: &Path, options: &ToolOptions) -> Result<Vec<String>, CommandError> {
    let Some(deps) = mr_config::read_dependencies(dir)? else {
        return Ok(Vec::new());
    };
    let (declared, undeclared): (Vec<String>, Vec<String>) = deps
        .into_keys()
        .partition(|name| options.is_dependency(name));
    if !undeclared.is_empty() {
        tracing::debug!(
            dir = %dir.display(),
            skipped = ?undeclared,
            "ignoring dependencies the hosting config does not declare"
        );
    }
    Ok(declared)
}

fn join_output(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
