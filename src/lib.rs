//! genques
//!
//! Ingests loosely-named source documents, clusters them into logical
//! batches by filename similarity, and generates one question document per
//! (batch, question type) through an external generation service, under a
//! bounded worker pool with live progress events.
//!
//! Typical flow:
//!
//! ```ignore
//! let inputs = discover::collect_documents(&selections);
//! let (events, mut rx) = event_channel();
//! let generator = Arc::new(GeminiGenerator::new(JobContext::from_env()?, out_dir)?);
//! let summary = run_generation(
//!     &inputs,
//!     &prompts::default_prompt_paths(),
//!     &RunConfig::new().with_concurrency(3),
//!     generator,
//!     &CancelFlag::new(),
//!     &events,
//! )
//! .await?;
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod events;
pub mod generator;
pub mod grouping;
pub mod pipeline;
pub mod planner;
pub mod progress;
pub mod prompts;
pub mod scheduler;
pub mod telemetry;

pub use config::RunConfig;
pub use error::RunError;
pub use events::{event_channel, EventReceiver, EventSender, RunEvent};
pub use generator::{DocumentGenerator, GeminiGenerator, GenerationRequest, JobContext};
pub use grouping::{FileGroup, FileGrouper, GroupingConfig};
pub use pipeline::run_generation;
pub use planner::{plan, QuestionType, Task, TaskResult};
pub use progress::{ProgressSnapshot, ProgressTracker, RunSummary};
pub use prompts::PromptSet;
pub use scheduler::{run_tasks, CancelFlag};
