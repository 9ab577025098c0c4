// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

// --- Logging ---

/// Tracing filter directive: MR_LOG > RUST_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("MR_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

// --- Worker binary ---

pub fn worker_binary() -> Option<String> {
    std::env::var("MR_WORKER_BINARY").ok().filter(|s| !s.is_empty())
}
