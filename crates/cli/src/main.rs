// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mr - run one command across many repositories in parallel

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod env;
mod exit_error;
mod reporter;
mod worker_binary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use mr_commands::Registry;
use mr_config::Overrides;
use mr_engine::{Dispatcher, PoolConfig, ProcessSpawner, RunPlan, WorkerPool};

use crate::exit_error::ExitError;
use crate::reporter::TerminalReporter;

#[derive(Parser, Debug)]
#[command(
    name = "mr",
    version,
    about = "Run a command across many repositories in parallel",
    styles = color::styles(),
    after_help = commands_help(),
)]
struct Cli {
    /// Directory to run in (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Config file to use instead of searching for mr.json
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of concurrent workers
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Only run on packages matching these globs
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    include: Vec<String>,

    /// Skip packages matching these globs
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Follow dependencies declared by synced repositories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Append each package's output to <DIR>/<package>.log
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            concurrency: self.concurrency,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            recursive: self.recursive,
            log_directory: self.log_dir.clone(),
        }
    }
}

fn commands_help() -> String {
    let registry = Registry::builtin();
    let width = registry.names().map(str::len).max().unwrap_or(0);
    let mut help = String::from("Commands:\n");
    for command in registry.iter() {
        help.push_str(&format!(
            "  {:<width$}  {}\n",
            command.name(),
            command.about(),
            width = width
        ));
    }
    help
}

#[tokio::main]
async fn main() {
    setup_logging();

    if let Err(e) = run().await {
        let code = e.downcast_ref::<ExitError>().map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output.
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some((name, args)) = cli.command.split_first() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let registry = Registry::builtin();
    let command = registry.get(name).ok_or_else(|| {
        let available: Vec<&str> = registry.names().collect();
        anyhow::anyhow!(
            "unknown command `{}` (available: {})",
            name,
            available.join(", ")
        )
    })?;

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let options = mr_config::load_options(&cwd, cli.config.as_deref(), &cli.overrides())?;

    command.before_execute(args, &options)?;
    let seeds = mr_config::select_packages(&options, command.supports_root())?;

    let binary = worker_binary::find_worker_binary();
    tracing::debug!(worker = %binary.display(), seeds = seeds.len(), "starting run");
    let spawner = ProcessSpawner::new(binary, options.cwd.clone());
    let pool = Arc::new(WorkerPool::new(
        Arc::new(spawner),
        PoolConfig::new(options.min_workers, options.concurrency),
    ));
    let plan = RunPlan {
        command,
        arguments: args.to_vec(),
        options,
        resolve: mr_config::resolve,
    };

    let summary = Dispatcher::new(pool, plan, Box::new(TerminalReporter::stdout()))
        .run(seeds)
        .await?;

    match summary.exit_code() {
        0 => Ok(()),
        code => Err(ExitError::new(code, String::new()).into()),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
