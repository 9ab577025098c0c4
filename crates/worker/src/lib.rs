// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker library
//!
//! Exposes the Task/Result protocol for the orchestrator and the serve loop
//! run by the `mrw` executable.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod protocol;
mod serve;

pub use protocol::{
    decode, encode, read_message, write_message, ProtocolError, Request, Response,
    MAX_MESSAGE_SIZE,
};
pub use serve::{handle_task, serve};
