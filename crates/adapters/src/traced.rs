// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::git::{GitAdapter, GitError};
use async_trait::async_trait;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any GitAdapter
#[derive(Clone)]
pub struct TracedGit<G> {
    inner: G,
}

impl<G> TracedGit<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

fn log_outcome<T>(op: &str, start: std::time::Instant, result: &Result<T, GitError>) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(_) => tracing::debug!(op, elapsed_ms, "git ok"),
        Err(e) => tracing::warn!(op, elapsed_ms, error = %e, "git failed"),
    }
}

#[async_trait]
impl<G: GitAdapter> GitAdapter for TracedGit<G> {
    async fn clone_repo(&self, url: &str, directory: &Path) -> Result<String, GitError> {
        async {
            tracing::info!("cloning");
            let start = std::time::Instant::now();
            let result = self.inner.clone_repo(url, directory).await;
            log_outcome("clone", start, &result);
            result
        }
        .instrument(tracing::info_span!("git.clone", url, dir = %directory.display()))
        .await
    }

    async fn checkout(&self, directory: &Path, revision: &str) -> Result<String, GitError> {
        let start = std::time::Instant::now();
        let result = self.inner.checkout(directory, revision).await;
        tracing::info_span!("git.checkout", dir = %directory.display(), revision)
            .in_scope(|| log_outcome("checkout", start, &result));
        result
    }

    async fn fetch(&self, directory: &Path) -> Result<String, GitError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch(directory).await;
        tracing::info_span!("git.fetch", dir = %directory.display())
            .in_scope(|| log_outcome("fetch", start, &result));
        result
    }

    async fn pull(&self, directory: &Path, branch: &str) -> Result<String, GitError> {
        let start = std::time::Instant::now();
        let result = self.inner.pull(directory, branch).await;
        tracing::info_span!("git.pull", dir = %directory.display(), branch)
            .in_scope(|| log_outcome("pull", start, &result));
        result
    }

    async fn current_branch(&self, directory: &Path) -> Result<Option<String>, GitError> {
        let result = self.inner.current_branch(directory).await;
        if let Err(ref e) = result {
            tracing::warn!(dir = %directory.display(), error = %e, "current_branch failed");
        }
        result
    }

    async fn head_commit(&self, directory: &Path) -> Result<String, GitError> {
        let result = self.inner.head_commit(directory).await;
        if let Err(ref e) = result {
            tracing::warn!(dir = %directory.display(), error = %e, "head_commit failed");
        }
        result
    }

    async fn is_clean(&self, directory: &Path) -> Result<bool, GitError> {
        self.inner.is_clean(directory).await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
