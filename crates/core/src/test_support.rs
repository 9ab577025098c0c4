// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{RepositoryInfo, Task, ToolOptions};
use std::path::Path;

/// Options for a hosting repository named `host` at `/test/host` declaring `deps`.
pub fn options_with_deps(deps: &[&str]) -> ToolOptions {
    let mut options = ToolOptions::new("/test/host", "host");
    for dep in deps {
        options
            .dependencies
            .insert(dep.to_string(), format!("org/{}", dep));
    }
    options
}

/// Repository info for `name` cloned under `packages`.
pub fn repository(packages: &Path, name: &str) -> RepositoryInfo {
    RepositoryInfo {
        url: format!("https://github.com/org/{}.git", name),
        branch: "master".to_string(),
        tag: None,
        directory: packages.join(name),
    }
}

/// A resolved task for dependency `name` running `command`.
pub fn task(name: &str, command: &str, options: &ToolOptions) -> Task {
    Task {
        package_name: name.to_string(),
        is_root_repository: false,
        command: command.to_string(),
        arguments: Vec::new(),
        repository: Some(repository(&options.packages, name)),
        options: options.clone(),
    }
}
