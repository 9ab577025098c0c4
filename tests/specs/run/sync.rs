//! `mr sync` and `mr save` specs against local repositories

use crate::prelude::*;

#[test]
fn clones_missing_repositories() {
    let ws = Workspace::empty();
    let a = ws.git_repo("remotes/a", &[("README", "hello from a\n")]);
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "a": a.display().to_string() }
    }));

    ws.mr()
        .args(&["sync"])
        .passes()
        .stdout_has(&format!("Cloned {} at \"master\".", a.display()));

    assert_eq!(ws.read("packages/a/README"), "hello from a\n");
}

#[test]
fn second_sync_updates_in_place() {
    let ws = Workspace::empty();
    let a = ws.git_repo("remotes/a", &[("README", "a\n")]);
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "a": a.display().to_string() }
    }));

    ws.mr().args(&["sync"]).passes();
    ws.mr()
        .args(&["sync"])
        .passes()
        .stdout_has("Updated \"master\".");
}

#[test]
fn recursive_sync_follows_discovered_dependencies() {
    let ws = Workspace::empty();
    let b = ws.git_repo("remotes/b", &[("README", "b\n")]);
    let b_spec = b.display().to_string();
    let a = ws.git_repo(
        "remotes/a",
        &[(
            "mr.json",
            &serde_json::json!({ "dependencies": { "b": b_spec } }).to_string(),
        )],
    );
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "a": a.display().to_string(), "b": b_spec }
    }));

    ws.mr()
        .args(&["--include", "a", "-r", "sync"])
        .passes()
        .stdout_has("[2/2] b");

    assert_eq!(ws.read("packages/b/README"), "b\n");
}

#[test]
fn missing_branch_fails_only_that_package() {
    let ws = Workspace::empty();
    let a = ws.git_repo("remotes/a", &[("README", "a\n")]);
    let b = ws.git_repo("remotes/b", &[("README", "b\n")]);
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": {
            "a": a.display().to_string(),
            "b": format!("{}#no-such-branch", b.display())
        }
    }));

    ws.mr()
        .args(&["sync"])
        .fails()
        .stdout_has("Failed packages: b");

    assert_eq!(ws.read("packages/a/README"), "a\n");
}

#[test]
fn save_pins_dependencies_to_head() {
    let ws = Workspace::empty();
    let a = ws.git_repo("remotes/a", &[("README", "a\n")]);
    let head = git(&a, &["rev-parse", "HEAD"]);
    ws.config(serde_json::json!({
        "name": "host",
        "dependencies": { "a": a.display().to_string() }
    }));

    ws.mr().args(&["sync"]).passes();
    ws.mr()
        .args(&["save"])
        .passes()
        .stdout_has("Saved 1 revision(s)");

    let config = ws.read_config();
    assert_eq!(
        config["dependencies"]["a"],
        format!("{}#{}", a.display(), head)
    );
}
