// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::FakeSpawner;
use mr_core::test_support::{options_with_deps, task};
use std::time::Duration;
use yare::parameterized;

fn pool(spawner: &FakeSpawner, min: usize, max: usize) -> Arc<WorkerPool> {
    Arc::new(WorkerPool::new(
        Arc::new(spawner.clone()),
        PoolConfig::new(min, max),
    ))
}

fn t(name: &str) -> Task {
    task(name, "status", &options_with_deps(&[name]))
}

#[parameterized(
    plain = { 1, 4, (1, 4) },
    min_above_max = { 8, 2, (2, 2) },
    zero_max = { 0, 0, (0, 1) },
)]
fn config_bounds(min: usize, max: usize, expected: (usize, usize)) {
    let config = PoolConfig::new(min, max);
    assert_eq!((config.min, config.max), expected);
}

#[tokio::test]
async fn workers_are_spawned_lazily() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 4);
    assert_eq!(pool.size(), 0);

    let worker = pool.acquire().await.unwrap();
    assert_eq!(worker.id(), &WorkerId::nth(1));
    assert_eq!(pool.size(), 1);
    assert_eq!(pool.busy(), 1);

    pool.release(worker);
    assert_eq!(pool.idle(), 1);
    assert_eq!(pool.busy(), 0);
}

#[tokio::test]
async fn start_keeps_min_workers_warm() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 2, 4);

    pool.start().await.unwrap();

    assert_eq!(pool.idle(), 2);
    assert_eq!(spawner.spawned().len(), 2);
    assert!(pool.is_done());
}

#[tokio::test]
async fn released_workers_are_reused() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 2);

    for name in ["a", "b", "c"] {
        let worker = pool.acquire().await.unwrap();
        worker.execute(t(name)).await.unwrap();
        pool.release(worker);
    }

    assert_eq!(spawner.spawned().len(), 1);
    assert_eq!(spawner.executed(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn acquire_waits_at_capacity() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 2);
    let first = pool.acquire().await.unwrap();
    let _second = pool.acquire().await.unwrap();

    let mut third = Box::pin(pool.acquire());
    assert!(
        tokio::time::timeout(Duration::from_millis(50), &mut third)
            .await
            .is_err(),
        "third acquire should wait for a release"
    );

    let first_id = first.id().clone();
    pool.release(first);
    let third = third.await.unwrap();

    assert_eq!(third.id(), &first_id);
    assert_eq!(spawner.spawned().len(), 2);
}

#[tokio::test]
async fn pending_acquire_counts_before_it_is_polled() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 1);
    assert!(pool.is_done());

    let request = pool.acquire();
    assert!(!pool.is_done());

    let worker = request.await.unwrap();
    assert!(!pool.is_done());

    pool.release(worker);
    assert!(pool.is_done());
}

#[tokio::test]
async fn dropped_acquire_is_no_longer_pending() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 1);

    drop(pool.acquire());

    assert!(pool.is_done());
    assert!(spawner.spawned().is_empty());
}

#[tokio::test]
async fn not_done_until_every_task_is_released() {
    let spawner = FakeSpawner::new();
    let pool = pool(&spawner, 0, 2);
    let names: Vec<String> = (0..5).map(|i| format!("pkg{i}")).collect();
    let holds: Vec<_> = names.iter().map(|n| spawner.hold(n)).collect();

    let mut handles = Vec::new();
    for name in &names {
        let acquire = pool.acquire();
        let pool = Arc::clone(&pool);
        let task = t(name);
        handles.push(tokio::spawn(async move {
            let worker = acquire.await.unwrap();
            let result = worker.execute(task).await.unwrap();
            pool.release(worker);
            result
        }));
    }

    for (i, hold) in holds.iter().enumerate() {
        assert!(!pool.is_done(), "done after {i} of 5");
        hold.notify_one();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(pool.is_done());
    assert!(spawner.max_in_flight() <= 2);
    assert_eq!(spawner.executed().len(), 5);
}

#[tokio::test]
async fn spawn_failure_reaches_the_caller() {
    let spawner = FakeSpawner::new();
    spawner.fail_spawns_after(0, "no such file");
    let pool = pool(&spawner, 0, 2);

    let err = pool.acquire().await.err().unwrap();

    assert!(matches!(err, PoolError::Spawn { .. }));
    assert_eq!(err.to_string(), "failed to spawn worker w1: no such file");
    assert!(pool.is_done());
}

#[tokio::test]
async fn crashed_worker_is_discarded_and_replaced() {
    let spawner = FakeSpawner::new();
    spawner.crash_on("bad");
    let pool = pool(&spawner, 0, 1);

    let worker = pool.acquire().await.unwrap();
    let err = worker.execute(t("bad")).await.unwrap_err();
    assert!(err.to_string().starts_with("worker w1 failed:"), "{err}");
    pool.discard(worker);
    assert_eq!(pool.size(), 0);

    let worker = pool.acquire().await.unwrap();
    assert_eq!(worker.id(), &WorkerId::nth(2));
    worker.execute(t("good")).await.unwrap();
    pool.release(worker);
    assert!(pool.is_done());
}

#[tokio::test]
async fn kill_all_terminates_idle_and_busy_workers() {
    let spawner = FakeSpawner::new();
    let _hold = spawner.hold("slow");
    let pool = pool(&spawner, 0, 2);

    let idle = pool.acquire().await.unwrap();
    pool.release(idle);
    let busy = pool.acquire().await.unwrap();
    let second = pool.acquire().await.unwrap();
    let in_flight = tokio::spawn(async move { second.execute(t("slow")).await });
    tokio::time::sleep(Duration::from_millis(10)).await;

    pool.kill_all().await;

    let mut terminated = spawner.terminated();
    terminated.sort();
    assert_eq!(terminated, vec![WorkerId::nth(1), WorkerId::nth(2)]);
    assert!(in_flight.await.unwrap().is_err());
    assert!(matches!(pool.acquire().await, Err(PoolError::Closed)));
    drop(busy);
}

async fn wait_for_size(pool: &WorkerPool, size: usize) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while pool.size() != size {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("pool stuck at {} workers, wanted {}", pool.size(), size));
}

#[tokio::test]
async fn crash_below_min_is_refilled_with_an_idle_worker() {
    let spawner = FakeSpawner::new();
    spawner.crash_on("x");
    let pool = pool(&spawner, 2, 2);
    pool.start().await.unwrap();

    let worker = pool.acquire().await.unwrap();
    assert!(worker.execute(t("x")).await.is_err());
    pool.discard(worker);
    wait_for_size(&pool, 2).await;

    assert_eq!(pool.idle(), 2);
    assert_eq!(spawner.spawned().len(), 3);
    assert!(pool.is_done());

    pool.kill_all().await;
    assert_eq!(spawner.terminated().len(), 3);
}

#[tokio::test]
async fn failed_refill_leaves_pool_usable() {
    let spawner = FakeSpawner::new();
    spawner.crash_on("x");
    spawner.fail_spawns_after(2, "out of processes");
    let pool = pool(&spawner, 2, 2);
    pool.start().await.unwrap();

    let worker = pool.acquire().await.unwrap();
    worker.execute(t("x")).await.unwrap_err();
    pool.discard(worker);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(pool.size(), 1);
    let worker = pool.acquire().await.unwrap();
    worker.execute(t("ok")).await.unwrap();
    pool.release(worker);
    assert!(pool.is_done());
}

#[tokio::test]
async fn no_refill_above_min() {
    let spawner = FakeSpawner::new();
    spawner.crash_on("x");
    let pool = pool(&spawner, 1, 3);
    pool.start().await.unwrap();

    let first = pool.acquire().await.unwrap();
    let second = pool.acquire().await.unwrap();
    second.execute(t("x")).await.unwrap_err();
    pool.discard(second);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(pool.size(), 1);
    assert_eq!(spawner.spawned().len(), 2);
    pool.release(first);
}
