// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mr_core::test_support::{options_with_deps, task};

#[test]
fn reported_error_is_forwarded_unchanged() {
    let mut reported = TaskResult::info("partial output");
    reported.logs.error.push("exit 2".to_string());

    let result = CommandError::Reported(reported.clone()).into_result();
    assert_eq!(result, reported);
}

#[test]
fn other_errors_become_a_single_error_line() {
    let err = CommandError::Git(GitError::Failed {
        command: "git fetch".to_string(),
        output: "fatal: no remote".to_string(),
    });
    let result = err.into_result();
    assert!(result.logs.info.is_empty());
    assert_eq!(result.logs.error, vec!["git fetch failed:\nfatal: no remote"]);
}

#[test]
fn repository_helper_rejects_unresolved_task() {
    let options = options_with_deps(&["a"]);
    let mut t = task("a", "sync", &options);
    assert!(repository(&t).is_ok());

    t.repository = None;
    let err = repository(&t).unwrap_err();
    assert!(err.to_string().contains("\"a\""), "got: {err}");
}
