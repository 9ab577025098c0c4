//! `mr exec` specs

use crate::prelude::*;

#[test]
fn runs_in_every_package_directory() {
    let ws = Workspace::with_deps(&["a", "b"]);
    ws.package_dir("a");
    ws.package_dir("b");

    let out = ws.mr().args(&["exec", "basename", "$(pwd)"]).passes();

    let stdout = out.stdout();
    assert!(stdout.contains("] a\na\n"), "{stdout}");
    assert!(stdout.contains("] b\nb\n"), "{stdout}");
    assert!(stdout.contains("[2/2] "), "{stdout}");
    assert!(stdout.contains("Execution time: "), "{stdout}");
    assert!(!stdout.contains("Failed packages"), "{stdout}");
}

#[test]
fn failing_package_fails_the_run() {
    let ws = Workspace::with_deps(&["a", "b", "c"]);
    for name in ["a", "b", "c"] {
        ws.package_dir(name);
    }
    ws.file("packages/b/broken", "");

    let out = ws
        .mr()
        .args(&["exec", "test", "!", "-e", "broken"])
        .fails();

    assert_eq!(out.code(), Some(1));
    let stdout = out.stdout();
    assert!(stdout.contains("`test ! -e broken` exited with status 1"), "{stdout}");
    assert!(stdout.ends_with("Failed packages: b\n"), "{stdout}");
}

#[test]
fn missing_working_copy_is_a_package_error() {
    let ws = Workspace::with_deps(&["a"]);

    ws.mr()
        .args(&["exec", "true"])
        .fails()
        .stdout_has("does not exist; run `mr sync` first")
        .stdout_has("Failed packages: a");
}

#[test]
fn empty_selection_is_not_an_error() {
    let ws = Workspace::with_deps(&["a", "b"]);

    ws.mr()
        .args(&["--include", "zzz*", "exec", "false"])
        .passes()
        .stdout_has("Execution time: ")
        .stdout_lacks("[");
}

#[test]
fn exclude_filters_packages() {
    let ws = Workspace::with_deps(&["a", "b"]);
    ws.package_dir("a");

    ws.mr()
        .args(&["--exclude", "b", "exec", "echo", "hi"])
        .passes()
        .stdout_has("[1/1] a\nhi\n");
}

#[test]
fn output_is_appended_to_log_directory() {
    let ws = Workspace::with_deps(&["a"]);
    ws.package_dir("a");

    ws.mr()
        .args(&["--log-dir", "logs", "exec", "echo", "logged"])
        .passes();

    assert!(ws.read("logs/a.log").contains(" INFO logged"));
}

#[test]
fn single_worker_runs_every_package() {
    let names: Vec<String> = (0..6).map(|i| format!("p{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let ws = Workspace::with_deps(&refs);
    for name in &refs {
        ws.package_dir(name);
    }

    let out = ws.mr().args(&["-j", "1", "exec", "true"]).passes();

    assert!(out.stdout().contains("[6/6] "), "{}", out.stdout());
}
