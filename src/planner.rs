//! Task Planning
//!
//! Expands each file group into one independent task per enabled question
//! type. Planning order is group-major, type-minor and stable; the
//! scheduler does not rely on it, but deterministic order keeps tests and
//! logs sane.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::grouping::FileGroup;
use crate::prompts::PromptSet;

/// The question formats a run can produce. Each type carries its own prompt
/// and is toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Four-option multiple choice ("trắc nghiệm").
    MultipleChoice,
    /// True/false ("đúng/sai").
    TrueFalse,
    /// Short answer ("trả lời ngắn").
    ShortAnswer,
}

impl QuestionType {
    /// All types in planning order.
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
    ];

    /// Short tag appended to artifact base names.
    pub fn suffix(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "TN",
            QuestionType::TrueFalse => "DS",
            QuestionType::ShortAnswer => "TLN",
        }
    }

    /// Human-readable label for logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple choice",
            QuestionType::TrueFalse => "true/false",
            QuestionType::ShortAnswer => "short answer",
        }
    }

    /// Default prompt filename for this type.
    pub fn default_prompt_file(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "testTN.txt",
            QuestionType::TrueFalse => "testDS.txt",
            QuestionType::ShortAnswer => "testTLN.txt",
        }
    }
}

/// One (group, question type) unit of work for the scheduler.
#[derive(Debug, Clone)]
pub struct Task {
    pub group_name: String,
    pub files: Vec<PathBuf>,
    pub question_type: QuestionType,
    pub prompt: String,
}

impl Task {
    /// Base name of the artifact this task produces, e.g. "Bai 10_TN".
    pub fn output_base_name(&self) -> String {
        format!("{}_{}", self.group_name, self.question_type.suffix())
    }
}

/// Outcome of one task. Produced exactly once per task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub group_name: String,
    pub question_type: QuestionType,
    pub success: bool,
    pub artifact_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl TaskResult {
    pub fn succeeded(task: &Task, artifact_path: PathBuf) -> Self {
        Self {
            group_name: task.group_name.clone(),
            question_type: task.question_type,
            success: true,
            artifact_path: Some(artifact_path),
            error: None,
        }
    }

    pub fn failed(task: &Task, error: impl Into<String>) -> Self {
        Self::failed_named(task.group_name.clone(), task.question_type, error)
    }

    /// Failure variant for when the task itself is no longer available,
    /// e.g. a worker panic surfaced as a join error.
    pub fn failed_named(
        group_name: String,
        question_type: QuestionType,
        error: impl Into<String>,
    ) -> Self {
        Self {
            group_name,
            question_type,
            success: false,
            artifact_path: None,
            error: Some(error.into()),
        }
    }
}

/// Expand groups into tasks: one per (group, type with non-empty prompt).
///
/// Emits nothing when no type has prompt text, which callers treat as zero
/// total work.
pub fn plan(groups: &[FileGroup], prompts: &PromptSet) -> Vec<Task> {
    let mut tasks = Vec::new();
    for group in groups {
        for question_type in QuestionType::ALL {
            let Some(text) = prompts.text(question_type) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            tasks.push(Task {
                group_name: group.name.clone(),
                files: group.files.clone(),
                question_type,
                prompt: text.to_string(),
            });
        }
    }
    tasks
}
