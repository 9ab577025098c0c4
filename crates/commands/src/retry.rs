// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry policy for transient clone failures.
//!
//! A remote that hangs up mid-clone is retried exactly once after a fixed
//! delay. Every other failure (auth, missing branch, conflicts) surfaces
//! immediately.
//!
//! ```text
//! ATTEMPTING --ok--> DONE
//! ATTEMPTING --transient, first attempt--> WAITING --> ATTEMPTING (retry)
//! ATTEMPTING --any failure on retry, or non-transient--> FAILED
//! ```

use mr_adapters::GitError;
use std::future::Future;
use std::time::Duration;

/// Fixed delay before the single retry.
pub const TRANSIENT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Total attempts for a transient failure, including the first.
pub const MAX_ATTEMPTS: u32 = 2;

const FATAL_MARKER: &str = "fatal:";
const HUNG_UP: &str = "remote end hung up unexpectedly";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: TRANSIENT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Default policy, with the delay overridable through the environment.
    pub fn from_env() -> Self {
        Self {
            delay: crate::env::retry_delay_ms().unwrap_or(TRANSIENT_RETRY_DELAY),
        }
    }
}

/// Which attempt an operation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retry,
}

/// True when some line of `output` starts with `fatal:` and reports that
/// the remote end hung up unexpectedly (case-insensitive).
pub fn is_transient_clone_error(output: &str) -> bool {
    output.lines().any(|line| {
        let line = line.trim_start();
        line.get(..FATAL_MARKER.len())
            .is_some_and(|marker| marker.eq_ignore_ascii_case(FATAL_MARKER))
            && line[FATAL_MARKER.len()..].to_lowercase().contains(HUNG_UP)
    })
}

/// Run `op`, retrying once after `policy.delay` if it fails transiently.
pub async fn retry_transient<F, Fut, T>(policy: &RetryPolicy, mut op: F) -> Result<T, GitError>
where
    F: FnMut(Attempt) -> Fut,
    Fut: Future<Output = Result<T, GitError>>,
{
    match op(Attempt::First).await {
        Ok(value) => Ok(value),
        Err(e) if is_transient_clone_error(e.output()) => {
            tracing::warn!(
                delay_ms = policy.delay.as_millis() as u64,
                error = %e,
                "remote hung up, retrying once"
            );
            tokio::time::sleep(policy.delay).await;
            op(Attempt::Retry).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
