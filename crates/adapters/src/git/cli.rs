// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git adapter backed by the `git` executable

use super::{GitAdapter, GitError};
use crate::subprocess::{output_text, run_captured};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Runs the `git` CLI in the target working copy.
#[derive(Clone, Debug, Default)]
pub struct CliGitAdapter;

impl CliGitAdapter {
    pub fn new() -> Self {
        Self
    }

    async fn git(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        let command = format!("git {}", args.join(" "));
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0");
        let output = run_captured(cmd, &command).await.map_err(GitError::Spawn)?;
        if output.status.success() {
            Ok(output_text(&output.stdout))
        } else {
            Err(GitError::Failed {
                command,
                output: output_text(&output.stderr),
            })
        }
    }
}

#[async_trait]
impl GitAdapter for CliGitAdapter {
    async fn clone_repo(&self, url: &str, directory: &Path) -> Result<String, GitError> {
        let parent = directory.parent().unwrap_or(directory);
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| GitError::Spawn(format!("create {}: {}", parent.display(), e)))?;
        let target = directory.to_string_lossy();
        self.git(parent, &["clone", "--quiet", url, target.as_ref()])
            .await
    }

    async fn checkout(&self, directory: &Path, revision: &str) -> Result<String, GitError> {
        self.git(directory, &["checkout", "--quiet", revision]).await
    }

    async fn fetch(&self, directory: &Path) -> Result<String, GitError> {
        self.git(directory, &["fetch", "--quiet"]).await
    }

    async fn pull(&self, directory: &Path, branch: &str) -> Result<String, GitError> {
        self.git(directory, &["pull", "--ff-only", "--quiet", "origin", branch])
            .await
    }

    async fn current_branch(&self, directory: &Path) -> Result<Option<String>, GitError> {
        let branch = self
            .git(directory, &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;
        Ok(Some(branch).filter(|b| b != "HEAD"))
    }

    async fn head_commit(&self, directory: &Path) -> Result<String, GitError> {
        self.git(directory, &["rev-parse", "HEAD"]).await
    }

    async fn is_clean(&self, directory: &Path) -> Result<bool, GitError> {
        let status = self.git(directory, &["status", "--porcelain"]).await?;
        Ok(status.is_empty())
    }
}
