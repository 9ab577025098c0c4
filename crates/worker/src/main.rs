// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process (mrw)
//!
//! Spawned by `mr`, one per pool slot. Reads tasks from stdin and writes
//! results to stdout until stdin is closed.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;

use std::sync::Arc;

use mr_adapters::{CliGitAdapter, GitAdapter, TracedGit};
use mr_commands::{CommandContext, Registry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("mrw {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("mrw {}", env!("CARGO_PKG_VERSION"));
                println!("Worker process for mr - executes one repository task at a time");
                println!();
                println!("USAGE:");
                println!("    mrw");
                println!();
                println!("The worker is started by `mr` and should not be invoked");
                println!("directly. It speaks a length-prefixed JSON protocol on");
                println!("stdin/stdout and exits when stdin is closed.");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: mrw [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let _log_guard = setup_logging();

    let git: Arc<dyn GitAdapter> = Arc::new(TracedGit::new(CliGitAdapter::new()));
    let ctx = CommandContext::new(git);
    let registry = Registry::builtin();

    info!(pid = std::process::id(), "worker ready");

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    if let Err(e) = mr_worker::serve(&mut stdin, &mut stdout, &registry, &ctx).await {
        error!("worker stopped: {}", e);
        return Err(e.into());
    }

    info!("worker exiting");
    Ok(())
}

/// Route tracing to stderr; stdout carries protocol frames only.
fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::new(env::log_filter());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    guard
}
