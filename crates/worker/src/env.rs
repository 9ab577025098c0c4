// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the worker binary.

/// Tracing filter directive: MR_LOG > RUST_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("MR_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}
