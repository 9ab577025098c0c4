// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the commands crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Delay before retrying a transient clone failure.
pub fn retry_delay_ms() -> Option<Duration> {
    parse_duration_ms("MR_RETRY_DELAY_MS")
}
