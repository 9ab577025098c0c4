// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Initial package selection

use crate::ConfigError;
use glob::Pattern;
use mr_core::{PackageRef, ToolOptions};

/// The ordered list of queue entries that seeds a run.
///
/// Declared dependencies are kept in config order and filtered through the
/// include/exclude globs. When the command supports it and a root repository
/// is configured, the root pseudo-package is prepended (subject to the same
/// filters, matched against the hosting package name).
pub fn select_packages(
    options: &ToolOptions,
    supports_root: bool,
) -> Result<Vec<String>, ConfigError> {
    let include = compile(&options.include)?;
    let exclude = compile(&options.exclude)?;
    let selected = |name: &str| {
        (include.is_empty() || include.iter().any(|p| p.matches(name)))
            && !exclude.iter().any(|p| p.matches(name))
    };

    let mut names = Vec::with_capacity(options.dependencies.len() + 1);
    if supports_root && options.root_repository.is_some() && selected(&options.name) {
        names.push(PackageRef::root_entry(&options.name));
    }
    names.extend(
        options
            .dependencies
            .keys()
            .filter(|name| selected(name))
            .cloned(),
    );

    tracing::debug!(selected = names.len(), "selected packages");
    Ok(names)
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
