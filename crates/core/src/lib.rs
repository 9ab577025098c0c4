// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mr-core: Core types shared by the mr CLI, its workers and the engine

pub mod id;
pub mod options;
pub mod package;
pub mod result;
pub mod task;
pub mod time_fmt;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use id::ShortId;
pub use options::ToolOptions;
pub use package::{PackageRef, ROOT_SIGIL};
pub use result::{Logs, TaskResult};
pub use task::{Progress, RepositoryInfo, Task};
pub use time_fmt::{format_duration, format_elapsed};
pub use worker::WorkerId;
