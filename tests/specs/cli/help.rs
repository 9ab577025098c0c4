//! Help and usage specs

use crate::prelude::*;

#[test]
fn no_command_prints_help() {
    cli()
        .args(&[])
        .passes()
        .stdout_has("Usage: mr")
        .stdout_has("Commands:");
}

#[test]
fn help_lists_every_command() {
    let out = cli().args(&["--help"]).passes();
    for line in [
        "  sync ",
        "  exec ",
        "  status ",
        "  save ",
        "--concurrency <N>",
        "--log-dir <DIR>",
    ] {
        assert!(out.stdout().contains(line), "missing {line:?}:\n{}", out.stdout());
    }
}

#[test]
fn version_is_printed() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("mr ", env!("CARGO_PKG_VERSION")));
}
