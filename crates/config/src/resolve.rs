// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository resolution
//!
//! A dependency spec is either a short `org/repo` path expanded through the
//! URL template, or a full URL / filesystem path used verbatim:
//!
//! - `org/repo`, `org/repo#branch`, `org/repo@tag`
//! - `https://host/org/repo.git#branch`, `git@host:org/repo.git`,
//!   `file:///srv/repo`, `/srv/repo`, `./vendored/repo`

use mr_core::{RepositoryInfo, ToolOptions};

/// Resolver signature: `(package_name, options, is_root_repository)`.
pub type ResolveFn = fn(&str, &ToolOptions, bool) -> Option<RepositoryInfo>;

/// Parsed dependency spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub url: String,
    pub branch: Option<String>,
    pub tag: Option<String>,
}

/// Resolve a package to its repository, or `None` when it cannot be resolved.
pub fn resolve(name: &str, options: &ToolOptions, is_root: bool) -> Option<RepositoryInfo> {
    let spec = if is_root {
        options.root_repository.as_deref()?
    } else {
        options.dependencies.get(name)?.as_str()
    };
    let parsed = parse_spec(spec, options)?;
    let directory = if is_root {
        options.cwd.clone()
    } else {
        options.package_dir(name)
    };
    Some(RepositoryInfo {
        url: parsed.url,
        branch: parsed
            .branch
            .unwrap_or_else(|| options.default_branch.clone()),
        tag: parsed.tag,
        directory,
    })
}

/// Parse a dependency spec. Returns `None` for specs that are neither a URL,
/// a path, nor a well-formed `org/repo` short form.
pub fn parse_spec(spec: &str, options: &ToolOptions) -> Option<RepoSpec> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    if is_url_or_path(spec) {
        let (location, branch) = split_suffix(spec, '#');
        let url = if location.starts_with('.') {
            options.cwd.join(location).display().to_string()
        } else {
            location.to_string()
        };
        return Some(RepoSpec {
            url,
            branch,
            tag: None,
        });
    }

    let (path, branch) = split_suffix(spec, '#');
    let (path, tag) = match branch {
        Some(_) => (path, None),
        None => split_suffix(path, '@'),
    };

    let mut parts = path.split('/');
    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(org), Some(repo), None) if !org.is_empty() && !repo.is_empty()
    );
    if !well_formed {
        return None;
    }

    Some(RepoSpec {
        url: options.url_template.replace("{path}", path),
        branch,
        tag,
    })
}

fn is_url_or_path(spec: &str) -> bool {
    spec.contains("://")
        || spec.starts_with("git@")
        || spec.starts_with('/')
        || spec.starts_with('.')
}

/// Split `value` at the last `sep`, treating an empty suffix as absent.
fn split_suffix(value: &str, sep: char) -> (&str, Option<String>) {
    match value.rsplit_once(sep) {
        Some((head, tail)) if !tail.is_empty() => (head, Some(tail.to_string())),
        Some((head, _)) => (head, None),
        None => (value, None),
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
