// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery and loading

use crate::ConfigError;
use indexmap::IndexMap;
use mr_core::options::{
    default_concurrency, DEFAULT_BRANCH, DEFAULT_PACKAGES_DIR, DEFAULT_URL_TEMPLATE,
};
use mr_core::ToolOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file looked up from the working directory upwards.
pub const CONFIG_FILE: &str = "mr.json";

/// The config file as written on disk. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub name: Option<String>,
    pub packages: Option<PathBuf>,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    pub root_repository: Option<String>,
    pub url_template: Option<String>,
    pub default_branch: Option<String>,
    pub concurrency: Option<usize>,
    pub min_workers: Option<usize>,
    pub recursive: Option<bool>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub log_directory: Option<PathBuf>,
}

/// Command-line settings layered over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub concurrency: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub recursive: bool,
    pub log_directory: Option<PathBuf>,
}

/// Walk up from `start` looking for [`CONFIG_FILE`].
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and resolve the tool options.
///
/// `config` selects the file explicitly; otherwise it is discovered from
/// `cwd`. The hosting repository is the directory containing the file.
pub fn load_options(
    cwd: &Path,
    config: Option<&Path>,
    overrides: &Overrides,
) -> Result<ToolOptions, ConfigError> {
    let path = match config {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => find_config(cwd).ok_or_else(|| ConfigError::NotFound(cwd.to_path_buf()))?,
    };
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file = parse_config(&content, &path)?;
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());

    tracing::debug!(path = %path.display(), dependencies = file.dependencies.len(), "loaded config");

    let mut options = resolve_file(file, &root, overrides)?;
    options.config_path = Some(path);
    Ok(options)
}

fn resolve_file(
    file: ConfigFile,
    root: &Path,
    overrides: &Overrides,
) -> Result<ToolOptions, ConfigError> {
    let name = match file.name {
        Some(name) if !name.is_empty() => name,
        _ => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "cannot derive a package name from {}; set \"name\"",
                    root.display()
                ))
            })?,
    };

    let packages = root.join(
        file.packages
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGES_DIR)),
    );

    let concurrency = overrides
        .concurrency
        .or(file.concurrency)
        .unwrap_or_else(default_concurrency);
    if concurrency == 0 {
        return Err(ConfigError::Invalid(
            "concurrency must be at least 1".to_string(),
        ));
    }
    let min_workers = file.min_workers.unwrap_or(0).min(concurrency);

    // CLI filters replace the file's rather than extending them
    let include = if overrides.include.is_empty() {
        file.include
    } else {
        overrides.include.clone()
    };
    let exclude = if overrides.exclude.is_empty() {
        file.exclude
    } else {
        overrides.exclude.clone()
    };

    let log_directory = overrides
        .log_directory
        .clone()
        .or(file.log_directory)
        .map(|dir| root.join(dir));

    Ok(ToolOptions {
        cwd: root.to_path_buf(),
        config_path: None,
        name,
        packages,
        dependencies: file.dependencies,
        root_repository: file.root_repository.filter(|spec| !spec.is_empty()),
        url_template: file
            .url_template
            .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string()),
        default_branch: file
            .default_branch
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        concurrency,
        min_workers,
        recursive: overrides.recursive || file.recursive.unwrap_or(false),
        include,
        exclude,
        log_directory,
    })
}

/// Dependencies declared by a repository's own config file, if it has one.
pub fn read_dependencies(dir: &Path) -> Result<Option<IndexMap<String, String>>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    Ok(Some(parse_config(&content, &path)?.dependencies))
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
