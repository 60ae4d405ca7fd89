//! Run-level errors.
//!
//! Only fatal, run-aborting conditions are typed here. Per-task failures
//! travel as plain descriptions inside [`crate::planner::TaskResult`] and
//! never cross the scheduler boundary as errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// A prompt file for an enabled question type could not be read.
    #[error("failed to read {label} prompt at {}: {source}", path.display())]
    Prompt {
        label: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required credentials are missing from the environment.
    #[error("missing credentials: {0}")]
    Credentials(String),
}
