// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher: seeds, deduplicates and drains the task queue.
//!
//! All queue state lives in [`Dispatcher`] and is touched only from
//! [`Dispatcher::run`]. Each dispatched task runs in its own tokio task that
//! borrows a worker from the pool and reports back over a channel, so
//! enqueueing and merging never interleave even though workers run in
//! parallel.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use mr_commands::Command;
use mr_config::ResolveFn;
use mr_core::{Logs, PackageRef, Progress, Task, TaskResult, ToolOptions};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::{
    Aggregator, DispatchError, PoolError, RepoLogger, Reporter, RunSummary, WorkerPool,
};

/// Everything a run needs to build tasks.
pub struct RunPlan {
    pub command: Arc<dyn Command>,
    /// User arguments, command name excluded
    pub arguments: Vec<String>,
    pub options: ToolOptions,
    pub resolve: ResolveFn,
}

struct Completion {
    package: PackageRef,
    outcome: Result<TaskResult, PoolError>,
}

pub struct Dispatcher {
    pool: Arc<WorkerPool>,
    plan: RunPlan,
    reporter: Box<dyn Reporter>,
    logger: Option<RepoLogger>,
    /// Raw queue entries already dispatched
    processed: HashSet<String>,
    aggregator: Aggregator,
    total: usize,
    done: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    started: Instant,
}

impl Dispatcher {
    pub fn new(pool: Arc<WorkerPool>, plan: RunPlan, reporter: Box<dyn Reporter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let logger = plan.options.log_directory.clone().map(RepoLogger::new);
        Self {
            pool,
            plan,
            reporter,
            logger,
            processed: HashSet::new(),
            aggregator: Aggregator::new(),
            total: 0,
            done: 0,
            tx,
            rx,
            started: Instant::now(),
        }
    }

    /// Drive the run to completion.
    ///
    /// Per-package failures end up in the summary. A pool failure is fatal:
    /// every worker is killed without waiting for in-flight tasks and the
    /// error is returned.
    pub async fn run(mut self, seeds: Vec<String>) -> Result<RunSummary, DispatchError> {
        self.started = Instant::now();
        // Warm workers only when something can be dispatched
        let host = &self.plan.options.name;
        if seeds.iter().any(|raw| raw != host) {
            if let Err(e) = self.pool.start().await {
                self.pool.kill_all().await;
                return Err(e.into());
            }
        }

        for raw in &seeds {
            if self.enqueue(raw) {
                self.total += 1;
            }
        }
        tracing::info!(
            command = self.plan.command.name(),
            seeded = self.total,
            "dispatching"
        );

        while !self.is_drained() {
            let Some(Completion { package, outcome }) = self.rx.recv().await else {
                break;
            };
            match outcome {
                Ok(result) => self.on_result(package, result),
                Err(e) => {
                    tracing::error!(package = %package, error = %e, "worker pool failed");
                    self.pool.kill_all().await;
                    return Err(e.into());
                }
            }
        }

        Ok(self.finalize().await)
    }

    fn is_drained(&self) -> bool {
        self.done == self.processed.len() && self.pool.is_done()
    }

    /// Dispatch a queue entry unless it was already dispatched or names the
    /// hosting package itself. Returns whether a task was created.
    fn enqueue(&mut self, raw: &str) -> bool {
        if self.processed.contains(raw) || raw == self.plan.options.name {
            return false;
        }
        self.processed.insert(raw.to_string());

        let package = PackageRef::parse(raw);
        let repository = (self.plan.resolve)(&package.name, &self.plan.options, package.is_root);
        if repository.is_none() {
            tracing::debug!(package = %package, "repository not resolved");
        }
        let task = Task {
            package_name: package.name.clone(),
            is_root_repository: package.is_root,
            command: self.plan.command.name().to_string(),
            arguments: self.plan.arguments.clone(),
            repository,
            options: self.plan.options.clone(),
        };

        // Counted as pending from here on
        let acquire = self.pool.acquire();
        let pool = Arc::clone(&self.pool);
        let tx = self.tx.clone();
        let span = tracing::info_span!("dispatch", package = %package);

        tokio::spawn(
            async move {
                let outcome = match acquire.await {
                    Ok(worker) => match worker.execute(task).await {
                        Ok(result) => {
                            pool.release(worker);
                            Ok(result)
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "worker failed mid-task");
                            pool.discard(worker);
                            Ok(TaskResult::error(e.to_string()))
                        }
                    },
                    Err(e) => Err(e),
                };
                // Receiver is gone only after a fatal error
                let _ = tx.send(Completion { package, outcome });
            }
            .instrument(span),
        );
        true
    }

    fn on_result(&mut self, package: PackageRef, result: TaskResult) {
        self.done += 1;
        for name in &result.discovered_packages {
            if self.enqueue(name) {
                self.total += 1;
            }
        }

        self.aggregator.merge(&package.name, &result);
        if let Some(logger) = &self.logger {
            logger.append(&package.name, &result.logs);
        }

        let progress = Progress {
            done: self.done,
            total: self.total,
        };
        tracing::debug!(package = %package, %progress, failed = result.is_failure(), "merged result");
        self.reporter.on_result(&package, &result.logs, progress);
    }

    async fn finalize(mut self) -> RunSummary {
        self.pool.kill_all().await;

        let command = &self.plan.command;
        let post_run = match command.after_execute(
            self.aggregator.processed(),
            self.aggregator.responses(),
            &self.plan.options,
        ) {
            Ok(logs) => logs,
            Err(e) => {
                tracing::warn!(command = command.name(), error = %e, "post-run hook failed");
                Logs {
                    info: Vec::new(),
                    error: vec![e.to_string()],
                }
            }
        };

        let summary = self.aggregator.finish(post_run, self.started.elapsed());
        tracing::info!(
            processed = summary.processed.len(),
            failed = summary.failed.len(),
            "run finished"
        );
        self.reporter.on_finish(&summary);
        summary
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
