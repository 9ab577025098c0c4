//! CLI error handling specs
//!
//! Everything here fails before a single worker is spawned.

use crate::prelude::*;

#[test]
fn unknown_command_lists_available_ones() {
    let ws = Workspace::with_deps(&["a"]);

    ws.mr()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("Error: unknown command `frobnicate` (available: sync, exec, status, save)");
}

#[test]
fn missing_config_is_reported() {
    let ws = Workspace::empty();

    ws.mr()
        .args(&["status"])
        .fails()
        .stderr_has("no mr.json found");
}

#[test]
fn malformed_config_is_reported() {
    let ws = Workspace::empty();
    ws.file("mr.json", "{ not json");

    ws.mr()
        .args(&["status"])
        .fails()
        .stderr_has("JSON parse error");
}

#[test]
fn exec_without_a_command_aborts_before_running() {
    let ws = Workspace::with_deps(&["a"]);
    ws.package_dir("a");

    ws.mr()
        .args(&["exec"])
        .fails()
        .stderr_has("exec requires a command to run")
        .stdout_lacks("[1/1]");
}

#[test]
fn zero_concurrency_is_rejected() {
    let ws = Workspace::with_deps(&["a"]);

    ws.mr()
        .args(&["-j", "0", "status"])
        .fails()
        .stderr_has("concurrency");
}

#[test]
fn missing_worker_binary_is_fatal() {
    let ws = Workspace::with_deps(&["a"]);

    ws.mr()
        .env("MR_WORKER_BINARY", "/nonexistent/mrw")
        .args(&["status"])
        .fails()
        .stderr_has("failed to spawn worker w1");
}
