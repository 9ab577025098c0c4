// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rewriting dependency specs in the config file

use crate::ConfigError;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Pin dependencies to revisions by rewriting their specs as `<spec>#<rev>`.
///
/// Any existing `#branch` or short-form `@tag` suffix is replaced. Keys and
/// fields the tool does not know about are preserved. Returns the number of
/// specs rewritten.
pub fn pin_dependencies(
    config_path: &Path,
    revisions: &IndexMap<String, String>,
) -> Result<usize, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    let mut doc: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: config_path.to_path_buf(),
        source,
    })?;

    let Some(deps) = doc.get_mut("dependencies").and_then(Value::as_object_mut) else {
        return Ok(0);
    };

    let mut pinned = 0;
    for (name, revision) in revisions {
        let Some(Value::String(spec)) = deps.get_mut(name) else {
            tracing::warn!(package = %name, "not declared in config, skipping pin");
            continue;
        };
        *spec = format!("{}#{}", strip_revision(spec), revision);
        pinned += 1;
    }

    let mut out = serde_json::to_string_pretty(&doc).map_err(|source| ConfigError::Json {
        path: config_path.to_path_buf(),
        source,
    })?;
    out.push('\n');
    std::fs::write(config_path, out)?;
    Ok(pinned)
}

fn strip_revision(spec: &str) -> &str {
    let spec = spec.split_once('#').map_or(spec, |(head, _)| head);
    let is_short = !(spec.contains("://") || spec.starts_with("git@"));
    if is_short {
        spec.rsplit_once('@').map_or(spec, |(head, _)| head)
    } else {
        spec
    }
}

#[cfg(test)]
#[path = "pin_tests.rs"]
mod tests;
