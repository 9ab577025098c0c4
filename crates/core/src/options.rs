// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fully resolved tool configuration.
//!
//! Produced by the config loader before orchestration starts and shipped,
//! read-only, inside every [`Task`](crate::Task).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOptions {
    /// Directory holding the config file (the hosting repository)
    pub cwd: PathBuf,
    /// Config file the options were loaded from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    /// Declared name of the hosting package
    pub name: String,
    /// Absolute directory where dependencies are cloned
    pub packages: PathBuf,
    /// Package name -> repository spec, in file order
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    /// Repository spec of the hosting repository itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_repository: Option<String>,
    pub url_template: String,
    pub default_branch: String,
    /// Maximum number of concurrent workers
    pub concurrency: usize,
    /// Workers spawned eagerly when the pool starts
    #[serde(default)]
    pub min_workers: usize,
    /// Follow transitive dependencies discovered by commands
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_directory: Option<PathBuf>,
}

impl ToolOptions {
    /// Options with defaults for a hosting repository at `cwd`.
    pub fn new(cwd: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let cwd = cwd.into();
        Self {
            packages: cwd.join(DEFAULT_PACKAGES_DIR),
            cwd,
            config_path: None,
            name: name.into(),
            dependencies: IndexMap::new(),
            root_repository: None,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            concurrency: default_concurrency(),
            min_workers: 0,
            recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
            log_directory: None,
        }
    }

    pub fn is_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Working copy directory of a dependency.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.packages.join(name)
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

pub const DEFAULT_PACKAGES_DIR: &str = "packages";
pub const DEFAULT_URL_TEMPLATE: &str = "https://github.com/{path}.git";
pub const DEFAULT_BRANCH: &str = "master";

/// Pool size used when neither config nor CLI sets one.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}
