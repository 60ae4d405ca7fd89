//! File Grouping
//!
//! Clusters loosely-named source paths into logical documents so each
//! cluster can be processed as one unit. Names in the wild disagree about
//! separators, carry date stamps and catalog codes, and live in
//! inconsistent folders; three merge rules (structural identifier, shared
//! suffix, edit similarity) cover the naming conventions seen in real
//! lesson archives.
//!
//! The clustering is greedy and single-pass: candidates are only ever
//! compared against the seed of the current cluster, never against other
//! members. That keeps it deterministic and fast, at the cost of the usual
//! greedy edge cases.

mod normalize;
mod similarity;

pub use normalize::{extract_identifiers, normalize, strip_extension, title_case, Identifier};
pub use similarity::similarity_ratio;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Thresholds for the grouping heuristic.
///
/// The defaults were tuned empirically against real lesson archives; they
/// are best-effort fuzzy-matching knobs, nothing deeper.
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Similarity ratio above which two keys always merge.
    pub similarity_threshold: f64,
    /// Relaxed ratio used when seed and candidate share a parent directory.
    pub same_dir_threshold: f64,
    /// Maximum number of trailing characters compared by the suffix rule.
    pub suffix_window: usize,
    /// Suffix comparisons shorter than this are ignored.
    pub min_suffix_len: usize,
    /// A common literal prefix must be longer than this to become a name.
    pub min_prefix_len: usize,
    /// Identifier-derived names shorter than this get the parent directory
    /// name prefixed for disambiguation.
    pub short_name_len: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.80,
            same_dir_threshold: 0.60,
            suffix_window: 20,
            min_suffix_len: 5,
            min_prefix_len: 5,
            short_name_len: 10,
        }
    }
}

/// A cluster of source files judged to represent one logical document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Display name, unique within one grouping run.
    pub name: String,
    /// Member paths in cluster-assembly order (seed first).
    pub files: Vec<PathBuf>,
}

/// Precomputed per-path facts so the scan loop never re-derives keys.
#[derive(Debug, Clone)]
struct PathFacts {
    path: PathBuf,
    parent: PathBuf,
    stem: String,
    key: String,
    /// Matching key of the last structural identifier, if any.
    last_id_key: Option<String>,
    /// Raw text of the last structural identifier, for naming.
    last_id_text: Option<String>,
}

impl PathFacts {
    fn new(path: PathBuf) -> Self {
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let identifiers = extract_identifiers(&basename);
        let last = identifiers.last();
        Self {
            parent: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            stem: strip_extension(&basename).to_string(),
            key: normalize(&basename),
            last_id_key: last.map(Identifier::key),
            last_id_text: last.map(|id| id.as_str().to_string()),
            path,
        }
    }
}

/// Groups raw file paths into named [`FileGroup`]s.
#[derive(Debug, Clone, Default)]
pub struct FileGrouper {
    config: GroupingConfig,
}

impl FileGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Partition `paths` into groups.
    ///
    /// Input is deduplicated and sorted lexicographically first, so the
    /// result does not depend on caller ordering. Every input path lands in
    /// exactly one group.
    pub fn group(&self, paths: &[PathBuf]) -> Vec<FileGroup> {
        let mut seen = HashSet::new();
        let mut pending: Vec<PathFacts> = paths
            .iter()
            .filter(|p| seen.insert(p.to_string_lossy().into_owned()))
            .cloned()
            .map(PathFacts::new)
            .collect();
        pending.sort_by(|a, b| a.path.to_string_lossy().cmp(&b.path.to_string_lossy()));

        let mut groups: Vec<FileGroup> = Vec::new();
        let mut used_names: HashSet<String> = HashSet::new();

        while !pending.is_empty() {
            let seed = pending.remove(0);
            let mut cluster = vec![seed];

            let mut i = 0;
            while i < pending.len() {
                if self.should_merge(&cluster[0], &pending[i]) {
                    cluster.push(pending.remove(i));
                } else {
                    i += 1;
                }
            }

            let base = self.name_cluster(&cluster);
            let mut name = base.clone();
            let mut counter = 1;
            while used_names.contains(&name) {
                name = format!("{}_{}", base, counter);
                counter += 1;
            }
            used_names.insert(name.clone());

            tracing::debug!(group = %name, files = cluster.len(), "cluster formed");
            groups.push(FileGroup {
                name,
                files: cluster.into_iter().map(|f| f.path).collect(),
            });
        }

        tracing::info!(inputs = seen.len(), groups = groups.len(), "grouping complete");
        groups
    }

    /// Apply the three merge rules in priority order, first match wins.
    fn should_merge(&self, seed: &PathFacts, cand: &PathFacts) -> bool {
        // Rule 1: matching structural identifiers, the strongest signal.
        if let (Some(a), Some(b)) = (&seed.last_id_key, &cand.last_id_key) {
            if a == b {
                return true;
            }
        }

        // Rule 2: identical trailing suffix of the comparison keys. Catches
        // "..._Ung pho voi thien tai" vs "... - Ung pho voi thien tai".
        let window = seed
            .key
            .chars()
            .count()
            .min(cand.key.chars().count())
            .min(self.config.suffix_window);
        if window > self.config.min_suffix_len && tail(&seed.key, window) == tail(&cand.key, window)
        {
            return true;
        }

        // Rule 3: whole-key similarity fallback.
        let ratio = similarity_ratio(&seed.key, &cand.key);
        if ratio > self.config.similarity_threshold {
            return true;
        }
        seed.parent == cand.parent && ratio > self.config.same_dir_threshold
    }

    fn name_cluster(&self, cluster: &[PathFacts]) -> String {
        let seed = &cluster[0];
        if cluster.len() == 1 {
            return seed.stem.clone();
        }

        let folder_name = seed
            .parent
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Folders usually carry the cleanest names, so a cluster that lives
        // in one folder borrows that folder's name.
        if cluster.iter().all(|f| f.parent == seed.parent) {
            return folder_name;
        }

        if let Some(id_text) = &seed.last_id_text {
            let mut name = title_case(id_text);
            if name.chars().count() < self.config.short_name_len {
                if folder_name.to_lowercase().contains(&name.to_lowercase()) {
                    name = folder_name;
                } else {
                    name = format!("{}_{}", folder_name, name);
                }
            }
            return name;
        }

        let common = common_prefix(&cluster[0].stem, &cluster[1].stem);
        let trimmed = common.trim_matches(|c: char| matches!(c, ' ' | '.' | '-' | '_'));
        if trimmed.chars().count() > self.config.min_prefix_len {
            trimmed.to_string()
        } else {
            folder_name
        }
    }
}

fn tail(s: &str, n: usize) -> Vec<char> {
    let chars: Vec<char> = s.chars().collect();
    chars[chars.len().saturating_sub(n)..].to_vec()
}

fn common_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn find_group<'a>(groups: &'a [FileGroup], member: &str) -> &'a FileGroup {
        groups
            .iter()
            .find(|g| g.files.iter().any(|f| f.to_string_lossy().contains(member)))
            .unwrap()
    }

    #[test]
    fn test_identifier_match_groups_variants() {
        let grouper = FileGrouper::new();
        let groups = grouper.group(&paths(&[
            "/docs/Bai10_KNTT.pdf",
            "/docs/Bai 10 (13.3.2025).pdf",
            "/docs/Chuong5.pdf",
        ]));

        assert_eq!(groups.len(), 2);
        let bai10 = find_group(&groups, "Bai10_KNTT");
        assert_eq!(bai10.files.len(), 2);
        let chuong5 = find_group(&groups, "Chuong5");
        assert_eq!(chuong5.files.len(), 1);
        assert_eq!(chuong5.name, "Chuong5");
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let input = paths(&[
            "/a/Bai 1.pdf",
            "/a/Bai 1 de.pdf",
            "/a/Bai 2.pdf",
            "/b/Unit 8 - Reading.pdf",
            "/b/unit8_writing.pdf",
            "/c/De cuong tong hop cuoi nam.pdf",
            "/a/Bai 1.pdf", // duplicate on purpose
        ]);
        let groups = FileGrouper::new().group(&input);

        let mut all: Vec<String> = groups
            .iter()
            .flat_map(|g| g.files.iter().map(|f| f.to_string_lossy().into_owned()))
            .collect();
        let total: usize = groups.iter().map(|g| g.files.len()).sum();
        assert_eq!(all.len(), total);

        all.sort();
        all.dedup();
        assert_eq!(all.len(), 6, "every deduped input appears exactly once");
    }

    #[test]
    fn test_grouping_deterministic_across_input_order() {
        let mut input = paths(&[
            "/x/Bai 3 on tap.pdf",
            "/x/bai3_de_cuong.pdf",
            "/y/Chuong 1.pdf",
            "/y/Chuong 2.pdf",
        ]);
        let first = FileGrouper::new().group(&input);
        input.reverse();
        let second = FileGrouper::new().group(&input);

        let as_map = |groups: &[FileGroup]| -> Vec<(String, Vec<String>)> {
            let mut v: Vec<_> = groups
                .iter()
                .map(|g| {
                    let mut files: Vec<String> = g
                        .files
                        .iter()
                        .map(|f| f.to_string_lossy().into_owned())
                        .collect();
                    files.sort();
                    (g.name.clone(), files)
                })
                .collect();
            v.sort();
            v
        };
        assert_eq!(as_map(&first), as_map(&second));
    }

    #[test]
    fn test_identifier_match_is_seed_transitive() {
        // Both candidates match the seed's identifier, so all three land in
        // one group even though the candidates are never compared to each
        // other. Known greedy-clustering behavior.
        let groups = FileGrouper::new().group(&paths(&[
            "/m/Bai 7.pdf",
            "/m/Bai 7 de cuong.pdf",
            "/n/bai7-trac-nghiem.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 3);
    }

    #[test]
    fn test_suffix_match_merges_renamed_twins() {
        let groups = FileGrouper::new().group(&paths(&[
            "/a/HDTN_Ung pho voi thien tai.pdf",
            "/b/De - Ung pho voi thien tai.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 2);
    }

    #[test]
    fn test_same_dir_relaxes_similarity_threshold() {
        // Keys share a good chunk but not 80%; same parent directory lets
        // the 0.60 threshold apply.
        let same_dir = FileGrouper::new().group(&paths(&[
            "/term1/de cuong on tap ky 1.pdf",
            "/term1/on tap ky 1 them.pdf",
        ]));
        assert_eq!(same_dir.len(), 1);

        let split_dirs = FileGrouper::new().group(&paths(&[
            "/term1/de cuong on tap ky 1.pdf",
            "/term2/on tap ky 1 them.pdf",
        ]));
        assert_eq!(split_dirs.len(), 2);
    }

    #[test]
    fn test_same_folder_cluster_named_after_folder() {
        let groups = FileGrouper::new().group(&paths(&[
            "/school/Bai 30 - Quang hop/ly thuyet bai 30.pdf",
            "/school/Bai 30 - Quang hop/bai tap bai 30.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Bai 30 - Quang hop");
    }

    #[test]
    fn test_short_identifier_name_gets_parent_prefix() {
        // Cluster spans two folders, seed identifier "Bai 9" is shorter
        // than 10 chars and not contained in the parent folder name.
        let groups = FileGrouper::new().group(&paths(&[
            "/Lich su 7/Bai 9 KNTT.pdf",
            "/de-kiem-tra/bai9_de.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Lich su 7_Bai 9");
    }

    #[test]
    fn test_identifier_already_in_parent_name_uses_parent() {
        let groups = FileGrouper::new().group(&paths(&[
            "/Tai lieu bai 9/Bai 9 KNTT.pdf",
            "/de-kiem-tra/bai9_de.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Tai lieu bai 9");
    }

    #[test]
    fn test_prefix_naming_without_identifiers() {
        let groups = FileGrouper::new().group(&paths(&[
            "/a/De cuong tong hop - phan doc hieu.pdf",
            "/b/De cuong tong hop phan doc hieu.pdf",
        ]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "De cuong tong hop");
    }

    #[test]
    fn test_name_collisions_get_numeric_suffixes() {
        // Two unrelated same-folder clusters whose folders share a basename
        // both want the name "On tap"; the second gets "_1".
        let groups = FileGrouper::new().group(&paths(&[
            "/2024/On tap/de cuong hoc ky mot phan A.pdf",
            "/2024/On tap/de cuong hoc ky mot phan B.pdf",
            "/2025/On tap/tong ket thi dua cuoi nam X.pdf",
            "/2025/On tap/tong ket thi dua cuoi nam Y.pdf",
        ]));
        assert_eq!(groups.len(), 2);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert!(names.contains(&"On tap"));
        assert!(names.contains(&"On tap_1"));
    }

    #[test]
    fn test_empty_input() {
        assert!(FileGrouper::new().group(&[]).is_empty());
    }
}
