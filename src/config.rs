//! Run Configuration
//!
//! Knobs the caller controls for one run: how many tasks run at once, how
//! submissions are spaced, and which model the collaborator should use.

use std::time::Duration;

/// Lower bound for the worker pool size.
pub const MIN_CONCURRENCY: usize = 1;
/// Upper bound for the worker pool size.
pub const MAX_CONCURRENCY: usize = 50;
/// Default pool size, safe against API rate limits.
pub const DEFAULT_CONCURRENCY: usize = 3;
/// Default pause between successive submissions. Smooths request bursts
/// against the rate-limited generation API; not a correctness mechanism.
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(100);
/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

#[derive(Debug, Clone)]
pub struct RunConfig {
    concurrency: usize,
    submission_delay: Duration,
    model: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            submission_delay: DEFAULT_SUBMISSION_DELAY,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size, clamped to the supported range.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
        self
    }

    pub fn with_submission_delay(mut self, delay: Duration) -> Self {
        self.submission_delay = delay;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn submission_delay(&self) -> Duration {
        self.submission_delay
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
