// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the `mrw` worker executable

use std::path::{Path, PathBuf};

pub const WORKER_BINARY: &str = "mrw";

/// `MR_WORKER_BINARY`, else `mrw` next to the running executable, else `mrw`
/// looked up on `PATH` when spawned.
pub fn find_worker_binary() -> PathBuf {
    if let Some(path) = crate::env::worker_binary() {
        return PathBuf::from(path);
    }
    let current_exe = std::env::current_exe().ok();
    current_exe
        .as_deref()
        .and_then(sibling_worker)
        .unwrap_or_else(|| PathBuf::from(WORKER_BINARY))
}

fn sibling_worker(exe: &Path) -> Option<PathBuf> {
    let sibling = exe.parent()?.join(WORKER_BINARY);
    sibling.exists().then_some(sibling)
}

#[cfg(test)]
#[path = "worker_binary_tests.rs"]
mod tests;
