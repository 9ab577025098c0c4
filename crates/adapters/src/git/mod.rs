// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git adapters

mod cli;

pub use cli::CliGitAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGitAdapter, GitCall, PartialClone};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from git operations
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// git ran and exited non-zero; `output` holds its stderr
    #[error("{command} failed:\n{output}")]
    Failed { command: String, output: String },
    /// git could not be run at all
    #[error("{0}")]
    Spawn(String),
}

impl GitError {
    /// Raw diagnostic text emitted by git, used for error classification.
    pub fn output(&self) -> &str {
        match self {
            GitError::Failed { output, .. } => output,
            GitError::Spawn(message) => message,
        }
    }
}

/// Adapter for the git operations commands need.
///
/// Every method takes the working copy explicitly; implementations must not
/// depend on the process's current directory.
#[async_trait]
pub trait GitAdapter: Send + Sync + 'static {
    /// Clone `url` into `directory` (which must not exist yet).
    async fn clone_repo(&self, url: &str, directory: &Path) -> Result<String, GitError>;

    /// Check out a branch, tag or commit.
    async fn checkout(&self, directory: &Path, revision: &str) -> Result<String, GitError>;

    /// Fetch from the default remote.
    async fn fetch(&self, directory: &Path) -> Result<String, GitError>;

    /// Fast-forward the current branch from its upstream.
    async fn pull(&self, directory: &Path, branch: &str) -> Result<String, GitError>;

    /// Current branch, or `None` when HEAD is detached.
    async fn current_branch(&self, directory: &Path) -> Result<Option<String>, GitError>;

    /// Full hash of HEAD.
    async fn head_commit(&self, directory: &Path) -> Result<String, GitError>;

    /// Whether the working tree has no uncommitted changes.
    async fn is_clean(&self, directory: &Path) -> Result<bool, GitError>;
}
