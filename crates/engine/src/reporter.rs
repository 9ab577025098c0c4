// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display seam for merged results

use mr_core::{Logs, PackageRef, Progress};

use crate::RunSummary;

/// Receives each package's logs as soon as its result is merged, then the
/// final summary. Called only from the dispatcher's loop.
pub trait Reporter: Send {
    fn on_result(&mut self, package: &PackageRef, logs: &Logs, progress: Progress);

    fn on_finish(&mut self, summary: &RunSummary);
}

/// Reporter that records every call, for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    inner: std::sync::Arc<parking_lot::Mutex<Recorded>>,
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
struct Recorded {
    results: Vec<(PackageRef, Logs, Progress)>,
    finished: Option<RunSummary>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<(PackageRef, Logs, Progress)> {
        self.inner.lock().results.clone()
    }

    pub fn finished(&self) -> Option<RunSummary> {
        self.inner.lock().finished.clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Reporter for RecordingReporter {
    fn on_result(&mut self, package: &PackageRef, logs: &Logs, progress: Progress) {
        self.inner
            .lock()
            .results
            .push((package.clone(), logs.clone(), progress));
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        self.inner.lock().finished = Some(summary.clone());
    }
}
