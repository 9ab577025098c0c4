// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process fake workers for pool and dispatcher tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mr_core::{Task, TaskResult, WorkerId};
use mr_worker::ProtocolError;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::pool::{WorkerConn, WorkerSpawner};
use crate::PoolError;

#[derive(Debug, Clone)]
enum Outcome {
    Reply(TaskResult),
    Crash,
}

#[derive(Default)]
struct FakeState {
    outcomes: HashMap<String, Outcome>,
    delays: HashMap<String, Duration>,
    holds: HashMap<String, Arc<Notify>>,
    /// Spawns allowed before every further spawn fails
    spawn_limit: Option<(u64, String)>,
    spawned: Vec<WorkerId>,
    terminated: Vec<WorkerId>,
    executed: Vec<(WorkerId, Task)>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Spawner producing fake workers that answer from a per-package script.
///
/// Packages without a scripted outcome answer with a single info line.
#[derive(Clone, Default)]
pub struct FakeSpawner {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, package: &str, result: TaskResult) {
        self.inner
            .lock()
            .outcomes
            .insert(package.to_string(), Outcome::Reply(result));
    }

    /// The worker handling `package` dies before replying.
    pub fn crash_on(&self, package: &str) {
        self.inner
            .lock()
            .outcomes
            .insert(package.to_string(), Outcome::Crash);
    }

    pub fn delay(&self, package: &str, delay: Duration) {
        self.inner.lock().delays.insert(package.to_string(), delay);
    }

    /// Hold `package`'s reply until the returned notify is signalled.
    pub fn hold(&self, package: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner
            .lock()
            .holds
            .insert(package.to_string(), Arc::clone(&notify));
        notify
    }

    /// Let `allowed` spawns succeed, then fail every further one.
    pub fn fail_spawns_after(&self, allowed: u64, reason: &str) {
        self.inner.lock().spawn_limit = Some((allowed, reason.to_string()));
    }

    pub fn spawned(&self) -> Vec<WorkerId> {
        self.inner.lock().spawned.clone()
    }

    pub fn terminated(&self) -> Vec<WorkerId> {
        self.inner.lock().terminated.clone()
    }

    /// Package names in the order their tasks reached a worker.
    pub fn executed(&self) -> Vec<String> {
        self.inner
            .lock()
            .executed
            .iter()
            .map(|(_, task)| task.package_name.clone())
            .collect()
    }

    pub fn tasks(&self) -> Vec<(WorkerId, Task)> {
        self.inner.lock().executed.clone()
    }

    /// Highest number of tasks executing at once.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().max_in_flight
    }
}

#[async_trait]
impl WorkerSpawner for FakeSpawner {
    async fn spawn(&self, id: &WorkerId) -> Result<Box<dyn WorkerConn>, PoolError> {
        let mut inner = self.inner.lock();
        if let Some((allowed, reason)) = &inner.spawn_limit {
            if inner.spawned.len() as u64 >= *allowed {
                return Err(PoolError::Spawn {
                    id: id.clone(),
                    reason: reason.clone(),
                });
            }
        }
        inner.spawned.push(id.clone());
        Ok(Box::new(FakeConn {
            id: id.clone(),
            state: Arc::clone(&self.inner),
        }))
    }
}

struct FakeConn {
    id: WorkerId,
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl WorkerConn for FakeConn {
    async fn execute(&mut self, task: Task) -> Result<TaskResult, ProtocolError> {
        let name = task.package_name.clone();
        let (outcome, delay, hold) = {
            let mut s = self.state.lock();
            s.executed.push((self.id.clone(), task));
            s.in_flight += 1;
            s.max_in_flight = s.max_in_flight.max(s.in_flight);
            let outcome = s
                .outcomes
                .get(&name)
                .cloned()
                .unwrap_or_else(|| Outcome::Reply(TaskResult::info(format!("done {}", name))));
            (outcome, s.delays.get(&name).copied(), s.holds.get(&name).cloned())
        };

        if let Some(hold) = hold {
            hold.notified().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.state.lock().in_flight -= 1;
        match outcome {
            Outcome::Reply(result) => Ok(result),
            Outcome::Crash => Err(ProtocolError::ConnectionClosed),
        }
    }

    async fn terminate(&mut self) {
        self.state.lock().terminated.push(self.id.clone());
    }
}
