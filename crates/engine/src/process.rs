// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workers as child processes speaking the length-prefixed protocol

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use mr_core::{Task, TaskResult, WorkerId};
use mr_worker::{decode, encode, read_message, write_message, ProtocolError, Request, Response};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::pool::{WorkerConn, WorkerSpawner};
use crate::PoolError;

/// Spawns the worker executable once per pool slot.
///
/// Workers inherit stderr so their tracing output reaches the terminal.
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    binary: PathBuf,
    cwd: PathBuf,
}

impl ProcessSpawner {
    pub fn new(binary: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            cwd: cwd.into(),
        }
    }
}

#[async_trait]
impl WorkerSpawner for ProcessSpawner {
    async fn spawn(&self, id: &WorkerId) -> Result<Box<dyn WorkerConn>, PoolError> {
        let spawn_error = |reason: String| PoolError::Spawn {
            id: id.clone(),
            reason,
        };

        let mut child = Command::new(&self.binary)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(format!("{}: {}", self.binary.display(), e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| spawn_error("worker stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_error("worker stdout unavailable".to_string()))?;

        tracing::debug!(worker = %id, pid = ?child.id(), "started worker process");
        Ok(Box::new(ProcessConn {
            id: id.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
        }))
    }
}

struct ProcessConn {
    id: WorkerId,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

#[async_trait]
impl WorkerConn for ProcessConn {
    async fn execute(&mut self, task: Task) -> Result<TaskResult, ProtocolError> {
        let data = encode(&Request::Execute { task })?;
        write_message(&mut self.stdin, &data).await?;
        let bytes = read_message(&mut self.stdout).await?;
        let Response::Done { result } = decode(&bytes)?;
        Ok(result)
    }

    async fn terminate(&mut self) {
        let _ = self.stdin.shutdown().await;
        if let Err(e) = self.child.kill().await {
            tracing::debug!(worker = %self.id, error = %e, "failed to kill worker process");
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
