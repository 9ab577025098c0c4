// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC protocol between the orchestrator and its workers.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

use mr_core::{Task, TaskResult};
use serde::{Deserialize, Serialize};

#[path = "protocol_wire.rs"]
mod wire;
pub use wire::{decode, encode, read_message, write_message, ProtocolError, MAX_MESSAGE_SIZE};

/// Request from the orchestrator to a worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Run one task and reply with [`Response::Done`]
    Execute { task: Task },
}

/// Response from a worker to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    Done { result: TaskResult },
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
