use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything the metrics know about one artifact snapshot.
///
/// A `Metadata` value is assembled once per rating attempt by a [`MetadataSource`](super::MetadataSource)
/// and then shared read-only between all metrics of that attempt. Every field defaults to empty so that
/// partial snapshots still deserialize; metrics treat missing data as missing evidence rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub readme_text: String,
    pub license_text: String,
    pub repo_files: BTreeSet<String>,
    pub vcs_stats: VcsStats,
    pub declared_sizes_by_platform: BTreeMap<String, i64>,
    pub lineage: Vec<LineageEntry>,
}

/// Version control activity for the artifact's source repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsStats {
    pub merged_prs: u64,
    pub open_prs: u64,
    pub contributors_by_login: BTreeMap<String, u64>,
    pub commits: Vec<CommitStat>,
}

/// A single commit's footprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitStat {
    pub author: String,
    pub additions: u64,
    pub deletions: u64,

    /// Whether the change landed through a reviewed pull request.
    pub reviewed: bool,
}

/// A parent artifact declared in the lineage of the artifact being rated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageEntry {
    pub id: String,

    /// Net score of the parent, when it has already been rated.
    pub net_score: Option<f64>,
}

impl Metadata {
    /// Returns `true` if the repository listing contains a path starting with any of `prefixes`.
    ///
    /// Matching is case-insensitive.
    #[must_use]
    pub fn has_file_with_prefix(&self, prefixes: &[&str]) -> bool {
        self.repo_files.iter().any(|file| {
            let file = file.to_ascii_lowercase();
            prefixes.iter().any(|prefix| file.starts_with(prefix))
        })
    }

    /// Returns `true` if the repository listing contains a file whose name (last path component) is one of `names`.
    #[must_use]
    pub fn has_file_named(&self, names: &[&str]) -> bool {
        self.repo_files.iter().any(|file| {
            let file = file.to_ascii_lowercase();
            let name = file.rsplit('/').next().unwrap_or_default();
            names.contains(&name)
        })
    }

    /// Returns `true` if any repository file ends with one of the given extensions (including the dot).
    #[must_use]
    pub fn has_file_with_extension(&self, extensions: &[&str]) -> bool {
        self.repo_files.iter().any(|file| {
            let file = file.to_ascii_lowercase();
            extensions.iter().any(|ext| file.ends_with(ext))
        })
    }

    /// Returns `true` if a file name contains one of `fragments` and ends with one of `extensions`.
    #[must_use]
    pub fn has_file_matching(&self, fragments: &[&str], extensions: &[&str]) -> bool {
        self.repo_files.iter().any(|file| {
            let file = file.to_ascii_lowercase();
            let name = file.rsplit('/').next().unwrap_or_default();
            fragments.iter().any(|fragment| name.contains(fragment)) && extensions.iter().any(|ext| name.ends_with(ext))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_snapshot_deserializes_with_defaults() {
        let json = r#"{ "readme_text": "hello", "vcs_stats": { "merged_prs": 3 } }"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.readme_text, "hello");
        assert_eq!(metadata.vcs_stats.merged_prs, 3);
        assert!(metadata.repo_files.is_empty());
        assert!(metadata.lineage.is_empty());
    }

    #[test]
    fn file_queries_are_case_insensitive() {
        let metadata = Metadata {
            repo_files: ["Tests/test_model.py", ".github/workflows/CI.yml", "src/Train.py"]
                .into_iter()
                .map(String::from)
                .collect(),
            ..Metadata::default()
        };

        assert!(metadata.has_file_with_prefix(&["tests/"]));
        assert!(metadata.has_file_with_prefix(&[".github/workflows/"]));
        assert!(metadata.has_file_named(&["train.py"]));
        assert!(metadata.has_file_with_extension(&[".py"]));
        assert!(!metadata.has_file_named(&["setup.py"]));
    }
}
