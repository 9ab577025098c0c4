// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the worker pool and dispatcher

use mr_core::WorkerId;
use thiserror::Error;

/// Errors raised by the worker pool
#[derive(Debug, Clone, Error)]
pub enum PoolError {
    #[error("failed to spawn worker {id}: {reason}")]
    Spawn { id: WorkerId, reason: String },
    /// The worker's connection broke while a task was in flight
    #[error("worker {id} failed: {reason}")]
    Crashed { id: WorkerId, reason: String },
    #[error("worker pool is shut down")]
    Closed,
}

/// Run-level failures. Any of these abandons the run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Pool(#[from] PoolError),
}
