// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package name normalization.
//!
//! Queue entries are plain strings. The hosting repository is queued as a
//! pseudo-package whose name carries a leading [`ROOT_SIGIL`]; the sigil is
//! stripped before the name is handed to the resolver or a worker.

use std::fmt;

/// Leading marker of the root pseudo-package in the queue.
pub const ROOT_SIGIL: char = '$';

/// A queue entry split into its package name and root flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub name: String,
    pub is_root: bool,
}

impl PackageRef {
    /// Parse a raw queue entry, stripping the root sigil if present.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(ROOT_SIGIL) {
            Some(name) => Self {
                name: name.to_string(),
                is_root: true,
            },
            None => Self {
                name: raw.to_string(),
                is_root: false,
            },
        }
    }

    /// The queue entry for the root pseudo-package of `name`.
    pub fn root_entry(name: &str) -> String {
        format!("{}{}", ROOT_SIGIL, name)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root {
            write!(f, "{} (root)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
