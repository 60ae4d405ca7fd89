//! Source Discovery
//!
//! Flattens a mixed selection of files and folders into the deduplicated,
//! sorted set of document paths the grouper consumes. Hierarchy is a UI
//! concern; the core only ever sees a flat set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted as source documents.
pub const DOCUMENT_EXTENSIONS: [&str; 1] = ["pdf"];

/// Collect source documents from files and folders (folders recursively).
pub fn collect_documents(selections: &[PathBuf]) -> Vec<PathBuf> {
    collect_documents_with_extensions(selections, &DOCUMENT_EXTENSIONS)
}

/// Same as [`collect_documents`] with a custom extension filter.
pub fn collect_documents_with_extensions(
    selections: &[PathBuf],
    extensions: &[&str],
) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for selection in selections {
        if selection.is_dir() {
            for entry in WalkDir::new(selection).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    found.insert(entry.path().to_path_buf());
                }
            }
        } else if has_extension(selection, extensions) {
            found.insert(selection.clone());
        }
    }
    tracing::debug!(
        selections = selections.len(),
        documents = found.len(),
        "source discovery complete"
    );
    found.into_iter().collect()
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|wanted| *wanted == ext)
        })
        .unwrap_or(false)
}
