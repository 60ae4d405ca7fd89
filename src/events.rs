//! Run Events
//!
//! Workers report through a channel to a single consumer; the caller owns
//! the receiving end and renders events however it likes (progress bar,
//! log lines, UI). Delivery is fire-and-forget: a dropped receiver never
//! fails a run.

use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Events emitted during one run, in completion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RunEvent {
    /// Free-form human-readable progress line.
    Status { message: String },
    /// Completed count is monotonically non-decreasing; total is constant
    /// for the run.
    Progress { completed: usize, total: usize },
    /// Fatal, run-aborting error, distinct from a single task's failure.
    Error { message: String },
    /// Terminal event, exactly one per run.
    Finished { artifact_paths: Vec<PathBuf> },
}

pub type EventSender = mpsc::UnboundedSender<RunEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<RunEvent>;

/// Create the event channel for one run.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
