//! Run Pipeline
//!
//! The end-to-end flow for one run: read prompts once, group the input
//! paths, expand groups into tasks, and hand the batch to the scheduler.
//! Fatal setup errors (an unreadable prompt) abort before any task is
//! planned; everything after that point is the scheduler's problem.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::RunConfig;
use crate::error::RunError;
use crate::events::{EventSender, RunEvent};
use crate::generator::DocumentGenerator;
use crate::grouping::FileGrouper;
use crate::planner::{plan, QuestionType};
use crate::progress::RunSummary;
use crate::prompts::PromptSet;
use crate::scheduler::{run_tasks, CancelFlag};

/// Run the full generation flow over a flat set of input paths.
///
/// `prompt_paths` holds one prompt file per enabled question type; types
/// absent from the map are disabled for the run. Events stream to `events`
/// as the run progresses, ending in exactly one `Finished`.
pub async fn run_generation(
    input_paths: &[PathBuf],
    prompt_paths: &BTreeMap<QuestionType, PathBuf>,
    config: &RunConfig,
    generator: Arc<dyn DocumentGenerator>,
    cancel: &CancelFlag,
    events: &EventSender,
) -> Result<RunSummary, RunError> {
    let run_id = Uuid::new_v4();
    let _ = events.send(RunEvent::Status {
        message: "Preparing data and reading prompts...".to_string(),
    });

    let prompts = match PromptSet::load(prompt_paths) {
        Ok(prompts) => prompts,
        Err(e) => {
            let _ = events.send(RunEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    let groups = FileGrouper::new().group(input_paths);
    let tasks = plan(&groups, &prompts);
    tracing::info!(
        %run_id,
        inputs = input_paths.len(),
        groups = groups.len(),
        tasks = tasks.len(),
        concurrency = config.concurrency(),
        "run planned"
    );

    if !tasks.is_empty() {
        let _ = events.send(RunEvent::Status {
            message: format!(
                "Starting {} tasks across {} groups...",
                tasks.len(),
                groups.len()
            ),
        });
        let _ = events.send(RunEvent::Progress {
            completed: 0,
            total: tasks.len(),
        });
    }

    let summary = run_tasks(tasks, generator, config, cancel, events).await;
    tracing::info!(
        %run_id,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run finished"
    );
    Ok(summary)
}
