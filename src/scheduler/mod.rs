//! Task Scheduler
//!
//! Runs planned tasks on a semaphore-bounded worker pool and collects
//! outcomes in completion order. A short pause between submissions keeps
//! the generation API from seeing a burst of requests in the same instant;
//! it never counts against the concurrency bound.
//!
//! Failure isolation is the invariant that matters: a task that errors or
//! panics becomes a failed result and nothing more. The run itself cannot
//! be crashed by one misbehaving task.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::RunConfig;
use crate::events::{EventSender, RunEvent};
use crate::generator::{DocumentGenerator, GenerationRequest};
use crate::planner::{Task, TaskResult};
use crate::progress::{ProgressTracker, RunSummary};

/// Cooperative cancellation flag, checked before submitting the next task
/// and before processing the next completion. Tasks already dispatched run
/// to completion and their results are still recorded; there is no hard
/// kill.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run `tasks` against `generator` with the configured concurrency bound.
///
/// Emits a status and a progress event per completion and exactly one
/// terminal [`RunEvent::Finished`]. Returns the final tally; task-level
/// failures never surface as errors.
pub async fn run_tasks(
    tasks: Vec<Task>,
    generator: Arc<dyn DocumentGenerator>,
    config: &RunConfig,
    cancel: &CancelFlag,
    events: &EventSender,
) -> RunSummary {
    let total = tasks.len();
    if total == 0 {
        let _ = events.send(RunEvent::Finished {
            artifact_paths: Vec::new(),
        });
        return RunSummary::empty();
    }

    let tracker = ProgressTracker::new(total);
    let semaphore = Arc::new(Semaphore::new(config.concurrency()));
    let mut in_flight = FuturesUnordered::new();

    let mut submitted = 0usize;
    for task in tasks {
        if cancel.is_cancelled() {
            tracing::info!(submitted, total, "cancelled, no further tasks submitted");
            break;
        }
        let semaphore = Arc::clone(&semaphore);
        let generator = Arc::clone(&generator);
        let model = config.model().to_string();
        let identity = (task.group_name.clone(), task.question_type);

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            execute_task(generator.as_ref(), &task, &model).await
        });
        in_flight.push(async move { (identity, handle.await) });
        submitted += 1;

        tokio::time::sleep(config.submission_delay()).await;
    }

    let mut cancel_seen = false;
    while let Some((identity, joined)) = in_flight.next().await {
        if cancel.is_cancelled() && !cancel_seen {
            cancel_seen = true;
            let _ = events.send(RunEvent::Status {
                message: "Cancellation requested, waiting for in-flight tasks".to_string(),
            });
        }

        let result = match joined {
            Ok(result) => result,
            Err(e) => TaskResult::failed_named(
                identity.0,
                identity.1,
                format!("worker panicked: {}", e),
            ),
        };

        let snapshot = tracker.record(&result);
        let message = if result.success {
            format!(
                "[{}/{}] Done {} ({})",
                snapshot.completed,
                snapshot.total,
                result.group_name,
                result.question_type.suffix()
            )
        } else {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            tracing::warn!(
                group = %result.group_name,
                question_type = result.question_type.suffix(),
                error = reason,
                "task failed"
            );
            format!(
                "[{}/{}] Failed {} ({}): {}",
                snapshot.completed,
                snapshot.total,
                result.group_name,
                result.question_type.suffix(),
                reason
            )
        };
        let _ = events.send(RunEvent::Status { message });
        let _ = events.send(RunEvent::Progress {
            completed: snapshot.completed,
            total: snapshot.total,
        });
    }

    let summary = tracker.summary();
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        artifacts = summary.total_artifacts(),
        "run complete"
    );
    let _ = events.send(RunEvent::Status {
        message: format!(
            "Run complete: {} succeeded, {} failed, {} artifacts",
            summary.succeeded,
            summary.failed,
            summary.total_artifacts()
        ),
    });
    let _ = events.send(RunEvent::Finished {
        artifact_paths: summary.artifact_paths.clone(),
    });
    summary
}

/// Execute one task and fold every outcome into a [`TaskResult`].
///
/// Success requires the collaborator to report a path that exists on disk
/// at return time; anything else is a failure with a description.
async fn execute_task(generator: &dyn DocumentGenerator, task: &Task, model: &str) -> TaskResult {
    let request = GenerationRequest {
        source_files: task.files.clone(),
        prompt_text: task.prompt.clone(),
        output_base_name: task.output_base_name(),
        model: model.to_string(),
        batch_label: task.group_name.clone(),
    };

    match generator.generate(request).await {
        Ok(path) if path.exists() => TaskResult::succeeded(task, path),
        Ok(path) => TaskResult::failed(
            task,
            format!("generator returned no artifact at {}", path.display()),
        ),
        Err(e) => TaskResult::failed(task, e),
    }
}
