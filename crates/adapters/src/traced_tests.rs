// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::git::{FakeGitAdapter, GitCall};

#[tokio::test]
async fn traced_git_delegates_to_inner() {
    let fake = FakeGitAdapter::new();
    let traced = TracedGit::new(fake.clone());
    let dir = Path::new("/repo");

    traced.checkout(dir, "dev").await.unwrap();
    traced.fetch(dir).await.unwrap();
    traced.pull(dir, "dev").await.unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            GitCall::Checkout {
                directory: dir.to_path_buf(),
                revision: "dev".to_string()
            },
            GitCall::Fetch {
                directory: dir.to_path_buf()
            },
            GitCall::Pull {
                directory: dir.to_path_buf(),
                branch: "dev".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn traced_git_passes_errors_through() {
    let fake = FakeGitAdapter::new();
    let traced = TracedGit::new(fake.clone());
    let tmp = tempfile::TempDir::new().unwrap();
    fake.fail_next_clone("fatal: nope");

    let err = traced
        .clone_repo("url", &tmp.path().join("r"))
        .await
        .unwrap_err();
    assert_eq!(err.output(), "fatal: nope");
}
