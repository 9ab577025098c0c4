// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mr execution engine: worker pool, dispatcher and result aggregation

mod aggregate;
mod dispatcher;
mod error;
pub mod pool;
mod process;
mod repo_logger;
mod reporter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregate::{Aggregator, RunSummary};
pub use dispatcher::{Dispatcher, RunPlan};
pub use error::{DispatchError, PoolError};
pub use pool::{PoolConfig, PooledWorker, WorkerConn, WorkerPool, WorkerSpawner};
pub use process::ProcessSpawner;
pub use repo_logger::RepoLogger;
pub use reporter::Reporter;

#[cfg(any(test, feature = "test-support"))]
pub use reporter::RecordingReporter;
#[cfg(any(test, feature = "test-support"))]
pub use test_support::FakeSpawner;
