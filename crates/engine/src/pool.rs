// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded pool of worker processes.
//!
//! Each worker is owned by an actor task that feeds it one job at a time and
//! tears it down when killed. The pool only tracks handles to those actors:
//! idle handles wait in a stack, busy ones are out on loan as
//! [`PooledWorker`]s. A semaphore with `max` permits bounds how many are busy.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use mr_core::{Task, TaskResult, WorkerId};
use mr_worker::ProtocolError;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use crate::PoolError;

/// Connection to one running worker.
#[async_trait]
pub trait WorkerConn: Send + 'static {
    /// Send a task and wait for its result.
    async fn execute(&mut self, task: Task) -> Result<TaskResult, ProtocolError>;

    /// Stop the worker and wait until it is gone.
    async fn terminate(&mut self);
}

/// Starts workers on demand.
#[async_trait]
pub trait WorkerSpawner: Send + Sync + 'static {
    async fn spawn(&self, id: &WorkerId) -> Result<Box<dyn WorkerConn>, PoolError>;
}

/// Pool size bounds. `min` workers are started eagerly by [`WorkerPool::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub min: usize,
    pub max: usize,
}

impl PoolConfig {
    /// Bounds with `max` raised to at least 1 and `min` clamped to `max`.
    pub fn new(min: usize, max: usize) -> Self {
        let max = max.max(1);
        Self {
            min: min.min(max),
            max,
        }
    }
}

type Reply = oneshot::Sender<Result<TaskResult, ProtocolError>>;

struct Job {
    task: Task,
    reply: Reply,
}

/// Handle to a worker actor.
struct Handle {
    id: WorkerId,
    jobs: mpsc::Sender<Job>,
}

struct Control {
    kill: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

#[derive(Default)]
struct PoolState {
    idle: Vec<Handle>,
    /// Every live worker, idle or busy
    controls: HashMap<WorkerId, Control>,
    spawned: u64,
    busy: usize,
    pending: usize,
    /// Background spawns topping the pool back up to `min`
    refilling: usize,
    refills: Vec<JoinHandle<()>>,
    closed: bool,
}

pub struct WorkerPool {
    spawner: Arc<dyn WorkerSpawner>,
    config: PoolConfig,
    permits: Arc<Semaphore>,
    state: Arc<Mutex<PoolState>>,
}

/// A worker on loan from the pool. Hand it back with
/// [`WorkerPool::release`] or [`WorkerPool::discard`].
pub struct PooledWorker {
    handle: Handle,
    permit: OwnedSemaphorePermit,
}

impl PooledWorker {
    pub fn id(&self) -> &WorkerId {
        &self.handle.id
    }

    /// Run one task on this worker.
    ///
    /// An error means the worker is unusable and must be discarded.
    pub async fn execute(&self, task: Task) -> Result<TaskResult, PoolError> {
        let crashed = |reason: String| PoolError::Crashed {
            id: self.handle.id.clone(),
            reason,
        };
        let (reply, rx) = oneshot::channel();
        self.handle
            .jobs
            .send(Job { task, reply })
            .await
            .map_err(|_| crashed("worker has exited".to_string()))?;
        match rx.await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(crashed(e.to_string())),
            Err(_) => Err(crashed("worker was terminated".to_string())),
        }
    }
}

impl WorkerPool {
    pub fn new(spawner: Arc<dyn WorkerSpawner>, config: PoolConfig) -> Self {
        Self {
            spawner,
            config,
            permits: Arc::new(Semaphore::new(config.max)),
            state: Arc::new(Mutex::new(PoolState::default())),
        }
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Spawn the `min` warm workers.
    pub async fn start(&self) -> Result<(), PoolError> {
        for _ in 0..self.config.min {
            let handle = spawn_worker(&self.state, self.spawner.as_ref()).await?;
            self.state.lock().idle.push(handle);
        }
        Ok(())
    }

    /// Request a worker.
    ///
    /// The request counts as pending from the moment this is called, before
    /// the returned future is first polled, so [`WorkerPool::is_done`] never
    /// reports a drained pool while a request is in transit. The future
    /// resolves with an idle worker, a freshly spawned one when below `max`,
    /// or waits for a release.
    pub fn acquire(&self) -> impl Future<Output = Result<PooledWorker, PoolError>> + Send + 'static {
        let pending = PendingGuard::new(Arc::clone(&self.state));
        let permits = Arc::clone(&self.permits);
        let state = Arc::clone(&self.state);
        let spawner = Arc::clone(&self.spawner);

        async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|_| PoolError::Closed)?;

            let reused = {
                let mut s = state.lock();
                if s.closed {
                    return Err(PoolError::Closed);
                }
                s.idle.pop()
            };
            let handle = match reused {
                Some(handle) => handle,
                None => spawn_worker(&state, spawner.as_ref()).await?,
            };

            pending.into_busy();
            tracing::trace!(worker = %handle.id, "acquired worker");
            Ok(PooledWorker { handle, permit })
        }
    }

    /// Return a worker to the idle set.
    pub fn release(&self, worker: PooledWorker) {
        let PooledWorker { handle, permit } = worker;
        {
            let mut s = self.state.lock();
            s.busy = s.busy.saturating_sub(1);
            if !s.closed && s.controls.contains_key(&handle.id) {
                s.idle.push(handle);
            }
        }
        // Only after the handle is idle, so a waiter reuses it instead of spawning
        drop(permit);
    }

    /// Drop a worker that failed mid-task.
    ///
    /// When that leaves fewer than `min` live workers, replacements are
    /// spawned in the background and parked as idle.
    pub fn discard(&self, worker: PooledWorker) {
        let PooledWorker { handle, permit } = worker;
        let control = {
            let mut s = self.state.lock();
            s.busy = s.busy.saturating_sub(1);
            s.controls.remove(&handle.id)
        };
        if let Some(control) = control {
            let _ = control.kill.send(());
        }
        tracing::debug!(worker = %handle.id, "discarded worker");
        drop(permit);
        self.refill();
    }

    fn refill(&self) {
        let mut s = self.state.lock();
        if s.closed {
            return;
        }
        let missing = self
            .config
            .min
            .saturating_sub(s.controls.len() + s.refilling);
        for _ in 0..missing {
            // No free permit means every slot is busy, so `min` live workers exist
            let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
                break;
            };
            s.refilling += 1;
            let state = Arc::clone(&self.state);
            let spawner = Arc::clone(&self.spawner);
            s.refills.push(tokio::spawn(async move {
                let spawned = spawn_worker(&state, spawner.as_ref()).await;
                {
                    let mut s = state.lock();
                    s.refilling -= 1;
                    match spawned {
                        Ok(handle) if s.controls.contains_key(&handle.id) => s.idle.push(handle),
                        Ok(_) | Err(PoolError::Closed) => {}
                        Err(e) => tracing::warn!(error = %e, "failed to refill warm worker"),
                    }
                }
                drop(permit);
            }));
        }
    }

    /// No pending acquire requests and no busy workers.
    pub fn is_done(&self) -> bool {
        let s = self.state.lock();
        s.pending == 0 && s.busy == 0
    }

    pub fn busy(&self) -> usize {
        self.state.lock().busy
    }

    pub fn idle(&self) -> usize {
        self.state.lock().idle.len()
    }

    /// Live workers, idle or busy.
    pub fn size(&self) -> usize {
        self.state.lock().controls.len()
    }

    /// Total workers ever spawned by this pool.
    pub fn spawned(&self) -> u64 {
        self.state.lock().spawned
    }

    /// Terminate every worker, idle or busy, and wait for each to be gone.
    ///
    /// Further acquires fail with [`PoolError::Closed`].
    pub async fn kill_all(&self) {
        let (controls, refills): (Vec<(WorkerId, Control)>, _) = {
            let mut s = self.state.lock();
            s.closed = true;
            s.idle.clear();
            (s.controls.drain().collect(), std::mem::take(&mut s.refills))
        };
        self.permits.close();

        let count = controls.len();
        for (id, control) in controls {
            let _ = control.kill.send(());
            if let Err(e) = control.join.await {
                tracing::warn!(worker = %id, error = %e, "worker task did not shut down cleanly");
            }
        }
        // A refill finishing after close terminates its own worker
        for refill in refills {
            let _ = refill.await;
        }
        tracing::debug!(count, "killed all workers");
    }
}

async fn spawn_worker(
    state: &Arc<Mutex<PoolState>>,
    spawner: &dyn WorkerSpawner,
) -> Result<Handle, PoolError> {
    let id = {
        let mut s = state.lock();
        s.spawned += 1;
        WorkerId::nth(s.spawned)
    };
    let conn = spawner.spawn(&id).await?;

    let (jobs_tx, jobs_rx) = mpsc::channel(1);
    let (kill_tx, kill_rx) = oneshot::channel();
    let join = tokio::spawn(run_worker(id.clone(), conn, jobs_rx, kill_rx));

    {
        let mut s = state.lock();
        if !s.closed {
            s.controls.insert(
                id.clone(),
                Control {
                    kill: kill_tx,
                    join,
                },
            );
            tracing::debug!(worker = %id, "spawned worker");
            return Ok(Handle { id, jobs: jobs_tx });
        }
    }

    // Pool was killed while this worker was starting
    let _ = kill_tx.send(());
    let _ = join.await;
    Err(PoolError::Closed)
}

/// Actor loop owning one worker connection.
///
/// Exits on kill (even with a task in flight), when every handle is gone, or
/// after the connection fails. The connection is terminated on every exit.
async fn run_worker(
    id: WorkerId,
    mut conn: Box<dyn WorkerConn>,
    mut jobs: mpsc::Receiver<Job>,
    mut kill: oneshot::Receiver<()>,
) {
    loop {
        let job = tokio::select! {
            _ = &mut kill => break,
            job = jobs.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let outcome = tokio::select! {
            _ = &mut kill => break,
            outcome = conn.execute(job.task) => outcome,
        };
        let failed = outcome.is_err();
        let _ = job.reply.send(outcome);
        if failed {
            break;
        }
    }

    conn.terminate().await;
    tracing::trace!(worker = %id, "worker terminated");
}

/// Counts an acquire request as pending until it either becomes busy or is
/// dropped.
struct PendingGuard {
    state: Arc<Mutex<PoolState>>,
    armed: bool,
}

impl PendingGuard {
    fn new(state: Arc<Mutex<PoolState>>) -> Self {
        state.lock().pending += 1;
        Self { state, armed: true }
    }

    fn into_busy(mut self) {
        let mut s = self.state.lock();
        s.pending = s.pending.saturating_sub(1);
        s.busy += 1;
        drop(s);
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.armed {
            let mut s = self.state.lock();
            s.pending = s.pending.saturating_sub(1);
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
