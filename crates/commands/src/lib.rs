// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Command logic executed by workers against a single repository

mod command;
mod env;
mod exec;
mod registry;
pub mod retry;
mod save;
mod status;
mod sync;

pub use command::{repository, Command, CommandContext, CommandError};
pub use exec::ExecCommand;
pub use registry::Registry;
pub use retry::{is_transient_clone_error, retry_transient, Attempt, RetryPolicy};
pub use save::SaveCommand;
pub use status::StatusCommand;
pub use sync::SyncCommand;
