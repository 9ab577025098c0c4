// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake git adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{GitAdapter, GitError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recorded git call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Clone { url: String, directory: PathBuf },
    Checkout { directory: PathBuf, revision: String },
    Fetch { directory: PathBuf },
    Pull { directory: PathBuf, branch: String },
    CurrentBranch { directory: PathBuf },
    HeadCommit { directory: PathBuf },
    IsClean { directory: PathBuf },
}

/// What a failed clone leaves behind at its target path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialClone {
    /// A half-populated working copy
    Directory,
    /// A plain file, which cannot be removed as a directory
    File,
}

#[derive(Default)]
struct FakeGitState {
    calls: Vec<GitCall>,
    /// Scripted clone outcomes, consumed in order; empty means success
    clone_failures: VecDeque<String>,
    partial_clone: Option<PartialClone>,
    /// Files written into the working copy after a successful clone
    clone_files: HashMap<String, Vec<(PathBuf, String)>>,
    checkout_failures: HashMap<PathBuf, String>,
    heads: HashMap<PathBuf, String>,
    detached: HashSet<PathBuf>,
    dirty: HashSet<PathBuf>,
}

/// Fake git adapter for testing
///
/// Successful clones create the target directory on disk so that commands
/// can inspect it afterwards.
#[derive(Clone, Default)]
pub struct FakeGitAdapter {
    inner: Arc<Mutex<FakeGitState>>,
}

impl FakeGitAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GitCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of clone attempts made so far
    pub fn clone_attempts(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, GitCall::Clone { .. }))
            .count()
    }

    /// Make the next clone fail with `output` as git's stderr
    pub fn fail_next_clone(&self, output: &str) {
        self.inner
            .lock()
            .clone_failures
            .push_back(output.to_string());
    }

    /// Make every failed clone leave `partial` at the target path
    pub fn leave_partial_clone(&self, partial: PartialClone) {
        self.inner.lock().partial_clone = Some(partial);
    }

    /// Write `content` to `relative` inside the working copy when `url` is cloned
    pub fn add_clone_file(&self, url: &str, relative: &str, content: &str) {
        self.inner
            .lock()
            .clone_files
            .entry(url.to_string())
            .or_default()
            .push((PathBuf::from(relative), content.to_string()));
    }

    pub fn fail_checkout(&self, directory: &Path, output: &str) {
        self.inner
            .lock()
            .checkout_failures
            .insert(directory.to_path_buf(), output.to_string());
    }

    pub fn set_head(&self, directory: &Path, hash: &str) {
        self.inner
            .lock()
            .heads
            .insert(directory.to_path_buf(), hash.to_string());
    }

    pub fn set_detached(&self, directory: &Path) {
        self.inner.lock().detached.insert(directory.to_path_buf());
    }

    pub fn set_dirty(&self, directory: &Path) {
        self.inner.lock().dirty.insert(directory.to_path_buf());
    }
}

fn leave_partial(directory: &Path, partial: PartialClone) -> std::io::Result<()> {
    match partial {
        PartialClone::Directory => std::fs::create_dir_all(directory.join(".git")),
        PartialClone::File => {
            if let Some(parent) = directory.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(directory, "")
        }
    }
}

#[async_trait]
impl GitAdapter for FakeGitAdapter {
    async fn clone_repo(&self, url: &str, directory: &Path) -> Result<String, GitError> {
        let files = {
            let mut inner = self.inner.lock();
            inner.calls.push(GitCall::Clone {
                url: url.to_string(),
                directory: directory.to_path_buf(),
            });
            if let Some(output) = inner.clone_failures.pop_front() {
                if let Some(partial) = inner.partial_clone {
                    leave_partial(directory, partial)
                        .map_err(|e| GitError::Spawn(e.to_string()))?;
                }
                return Err(GitError::Failed {
                    command: format!("git clone {}", url),
                    output,
                });
            }
            inner.clone_files.get(url).cloned().unwrap_or_default()
        };

        std::fs::create_dir_all(directory).map_err(|e| GitError::Spawn(e.to_string()))?;
        for (relative, content) in files {
            std::fs::write(directory.join(relative), content)
                .map_err(|e| GitError::Spawn(e.to_string()))?;
        }
        Ok(String::new())
    }

    async fn checkout(&self, directory: &Path, revision: &str) -> Result<String, GitError> {
        let mut inner = self.inner.lock();
        inner.calls.push(GitCall::Checkout {
            directory: directory.to_path_buf(),
            revision: revision.to_string(),
        });
        match inner.checkout_failures.get(directory) {
            Some(output) => Err(GitError::Failed {
                command: format!("git checkout {}", revision),
                output: output.clone(),
            }),
            None => Ok(String::new()),
        }
    }

    async fn fetch(&self, directory: &Path) -> Result<String, GitError> {
        self.inner.lock().calls.push(GitCall::Fetch {
            directory: directory.to_path_buf(),
        });
        Ok(String::new())
    }

    async fn pull(&self, directory: &Path, branch: &str) -> Result<String, GitError> {
        self.inner.lock().calls.push(GitCall::Pull {
            directory: directory.to_path_buf(),
            branch: branch.to_string(),
        });
        Ok("Already up to date.".to_string())
    }

    async fn current_branch(&self, directory: &Path) -> Result<Option<String>, GitError> {
        let mut inner = self.inner.lock();
        inner.calls.push(GitCall::CurrentBranch {
            directory: directory.to_path_buf(),
        });
        if inner.detached.contains(directory) {
            return Ok(None);
        }
        // Last revision checked out in this directory, else master
        let branch = inner
            .calls
            .iter()
            .rev()
            .find_map(|call| match call {
                GitCall::Checkout {
                    directory: d,
                    revision,
                } if d == directory => Some(revision.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "master".to_string());
        Ok(Some(branch))
    }

    async fn head_commit(&self, directory: &Path) -> Result<String, GitError> {
        let mut inner = self.inner.lock();
        inner.calls.push(GitCall::HeadCommit {
            directory: directory.to_path_buf(),
        });
        Ok(inner
            .heads
            .get(directory)
            .cloned()
            .unwrap_or_else(|| "0000000000000000000000000000000000000000".to_string()))
    }

    async fn is_clean(&self, directory: &Path) -> Result<bool, GitError> {
        let mut inner = self.inner.lock();
        inner.calls.push(GitCall::IsClean {
            directory: directory.to_path_buf(),
        });
        Ok(!inner.dirty.contains(directory))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
