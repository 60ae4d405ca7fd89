//! Prompt Loading
//!
//! Each question type reads its prompt from a text file. A file placed next
//! to the executable overrides the bundled default in the user config
//! directory, so prompts stay user-editable without a rebuild.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::RunError;
use crate::planner::QuestionType;

/// Prompt text per question type for one run.
#[derive(Debug, Clone, Default)]
pub struct PromptSet {
    texts: BTreeMap<QuestionType, String>,
}

impl PromptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_type: QuestionType, text: impl Into<String>) {
        self.texts.insert(question_type, text.into());
    }

    pub fn text(&self, question_type: QuestionType) -> Option<&str> {
        self.texts.get(&question_type).map(String::as_str)
    }

    /// Types that have non-blank prompt text, in planning order.
    pub fn enabled_types(&self) -> Vec<QuestionType> {
        QuestionType::ALL
            .into_iter()
            .filter(|qt| self.text(*qt).is_some_and(|t| !t.trim().is_empty()))
            .collect()
    }

    /// Read prompt files for every enabled type. An unreadable prompt is a
    /// fatal run-level error: no tasks get planned.
    pub fn load(paths: &BTreeMap<QuestionType, PathBuf>) -> Result<Self, RunError> {
        let mut set = Self::new();
        for (question_type, path) in paths {
            let text = fs::read_to_string(path).map_err(|source| RunError::Prompt {
                label: question_type.label(),
                path: path.clone(),
                source,
            })?;
            tracing::debug!(
                prompt = question_type.label(),
                path = %path.display(),
                bytes = text.len(),
                "prompt loaded"
            );
            set.insert(*question_type, text);
        }
        Ok(set)
    }
}

/// Resolve a prompt filename: an override next to the executable wins,
/// otherwise fall back to the bundled copy in the user config directory.
pub fn resolve_prompt_path(filename: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let external = dir.join(filename);
            if external.exists() {
                tracing::debug!(path = %external.display(), "using external prompt override");
                return external;
            }
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("genques").join(filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}

/// Default prompt paths for all question types.
pub fn default_prompt_paths() -> BTreeMap<QuestionType, PathBuf> {
    QuestionType::ALL
        .into_iter()
        .map(|qt| (qt, resolve_prompt_path(qt.default_prompt_file())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reads_all_prompt_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = BTreeMap::new();
        for qt in QuestionType::ALL {
            let path = dir.path().join(qt.default_prompt_file());
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "prompt for {}", qt.label()).unwrap();
            paths.insert(qt, path);
        }

        let set = PromptSet::load(&paths).unwrap();
        assert_eq!(set.enabled_types().len(), 3);
        assert!(set
            .text(QuestionType::TrueFalse)
            .unwrap()
            .contains("true/false"));
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = BTreeMap::new();
        paths.insert(
            QuestionType::MultipleChoice,
            dir.path().join("does-not-exist.txt"),
        );

        let err = PromptSet::load(&paths).unwrap_err();
        match err {
            RunError::Prompt { label, .. } => assert_eq!(label, "multiple choice"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_enabled_types_skips_blank_text() {
        let mut set = PromptSet::new();
        set.insert(QuestionType::MultipleChoice, "  ");
        set.insert(QuestionType::ShortAnswer, "ask short questions");
        assert_eq!(set.enabled_types(), vec![QuestionType::ShortAnswer]);
    }

    #[test]
    fn test_default_prompt_paths_cover_all_types() {
        let paths = default_prompt_paths();
        assert_eq!(paths.len(), 3);
        assert!(paths
            .get(&QuestionType::MultipleChoice)
            .unwrap()
            .to_string_lossy()
            .ends_with("testTN.txt"));
    }
}
