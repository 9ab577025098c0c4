// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker's receive/execute/reply loop

use crate::protocol::{decode, encode, read_message, write_message, ProtocolError};
use crate::{Request, Response};
use mr_commands::{CommandContext, Registry};
use mr_core::{Task, TaskResult};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::Instrument;

/// Serve tasks until the orchestrator closes the request stream.
///
/// Tasks are handled strictly one at a time. A clean EOF between frames
/// ends the loop with `Ok(())`.
pub async fn serve<R, W>(
    reader: &mut R,
    writer: &mut W,
    registry: &Registry,
    ctx: &CommandContext,
) -> Result<(), ProtocolError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let bytes = match read_message(reader).await {
            Ok(bytes) => bytes,
            Err(ProtocolError::ConnectionClosed) => {
                tracing::debug!("request stream closed");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let Request::Execute { task } = decode(&bytes)?;
        let span = tracing::info_span!(
            "task",
            package = %task.package_name,
            command = %task.command,
        );
        let result = handle_task(task, registry, ctx).instrument(span).await;

        let data = encode(&Response::Done { result })?;
        write_message(writer, &data).await?;
    }
}

/// Run one task to a result. Never fails: every error becomes a result.
pub async fn handle_task(task: Task, registry: &Registry, ctx: &CommandContext) -> TaskResult {
    let Some(command) = registry.get(&task.command) else {
        return TaskResult::error(format!("unknown command \"{}\"", task.command));
    };
    if task.repository.is_none() {
        return TaskResult::info(format!(
            "Could not resolve repository of \"{}\", skipped.",
            task.package_name
        ));
    }

    match command.execute(&task, ctx).await {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            e.into_result()
        }
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
