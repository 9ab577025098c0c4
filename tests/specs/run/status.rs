//! `mr status` specs

use crate::prelude::*;

#[test]
fn uncloned_packages_are_reported_not_failed() {
    let ws = Workspace::with_deps(&["a"]);

    ws.mr()
        .args(&["status"])
        .passes()
        .stdout_has("[1/1] a\nNot cloned yet.\n");
}

#[test]
fn unresolvable_spec_is_skipped_with_info() {
    let ws = Workspace::empty();
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "bad": "not-a-spec" }
    }));

    ws.mr()
        .args(&["status"])
        .passes()
        .stdout_has("Could not resolve repository of \"bad\", skipped.");
}

#[test]
fn reports_branch_and_cleanliness() {
    let ws = Workspace::with_deps(&[]);
    let repo = ws.git_repo("packages/a", &[("README", "a\n")]);
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "a": repo.display().to_string() }
    }));
    std::fs::write(repo.join("README"), "changed\n").unwrap();

    ws.mr()
        .args(&["status"])
        .passes()
        .stdout_has("master at ")
        .stdout_has(", uncommitted changes");
}
