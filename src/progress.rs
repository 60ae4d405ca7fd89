//! Progress Tracking
//!
//! Mutex-guarded counters shared by the run: completed, failed, and the
//! artifact list. The lock is held only for the increment/append, never
//! across a generation call. State is per-run: reset on construction,
//! discarded with the run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::planner::TaskResult;

/// Point-in-time view returned by [`ProgressTracker::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
struct ProgressInner {
    completed: usize,
    failed: usize,
    artifacts: Vec<PathBuf>,
}

/// Thread-safe per-run progress state.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    inner: Mutex<ProgressInner>,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            inner: Mutex::new(ProgressInner::default()),
        }
    }

    /// Record one task outcome and return the updated counts.
    pub fn record(&self, result: &TaskResult) -> ProgressSnapshot {
        let mut inner = self.inner.lock().expect("progress lock poisoned");
        inner.completed += 1;
        if result.success {
            if let Some(path) = &result.artifact_path {
                inner.artifacts.push(path.clone());
            }
        } else {
            inner.failed += 1;
        }
        ProgressSnapshot {
            completed: inner.completed,
            failed: inner.failed,
            total: self.total,
        }
    }

    /// Final tally for the run. Artifacts are in completion order.
    pub fn summary(&self) -> RunSummary {
        let inner = self.inner.lock().expect("progress lock poisoned");
        RunSummary {
            succeeded: inner.completed - inner.failed,
            failed: inner.failed,
            total: self.total,
            artifact_paths: inner.artifacts.clone(),
            finished_at: Utc::now(),
        }
    }
}

/// Final report for one run. Always present, even when every task failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Planned task count for the run.
    pub total: usize,
    /// Artifacts in completion order.
    pub artifact_paths: Vec<PathBuf>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn empty() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            total: 0,
            artifact_paths: Vec::new(),
            finished_at: Utc::now(),
        }
    }

    pub fn total_artifacts(&self) -> usize {
        self.artifact_paths.len()
    }
}
