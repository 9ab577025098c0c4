// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task: one command invocation against one repository

use crate::ToolOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Resolved location of a package's repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    /// Clone URL (or local path)
    pub url: String,
    /// Branch to check out (also used for pinned commit hashes)
    pub branch: String,
    /// Tag to check out instead of the branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Working copy location
    pub directory: PathBuf,
}

impl RepositoryInfo {
    /// The revision to check out: the tag when pinned to one, else the branch.
    pub fn revision(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.branch)
    }
}

/// Immutable description of one unit of work.
///
/// A task is sent to exactly one worker and yields exactly one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub package_name: String,
    pub is_root_repository: bool,
    /// Name of the command logic the worker loads from its registry
    pub command: String,
    /// User-supplied arguments, command name excluded
    pub arguments: Vec<String>,
    /// `None` when resolution failed
    pub repository: Option<RepositoryInfo>,
    pub options: ToolOptions,
}

/// Progress counters reported alongside each merged result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}
