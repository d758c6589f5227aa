use crate::facts::Metadata;
use crate::metrics::weights::CODE_QUALITY;
use crate::metrics::{Measurement, Metric};

/// Repository hygiene judged from the file listing.
///
/// Each of five practices contributes 0.2: tests, CI workflows, lint or format configuration, a dependency
/// manifest, and packaging metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeQuality;

fn has_tests(metadata: &Metadata) -> bool {
    metadata.has_file_with_prefix(&["tests/", "test/"])
        || metadata.repo_files.iter().any(|file| {
            let file = file.to_ascii_lowercase();
            file.contains("/tests/") || file.contains("test_") || file.contains("_test.")
        })
}

fn has_ci(metadata: &Metadata) -> bool {
    metadata.has_file_with_prefix(&[".github/workflows/", ".gitlab-ci", ".circleci/", "azure-pipelines"])
        || metadata.has_file_named(&[".travis.yml", "jenkinsfile"])
}

fn has_lint_config(metadata: &Metadata) -> bool {
    metadata.has_file_named(&[
        ".flake8",
        ".pylintrc",
        "ruff.toml",
        ".ruff.toml",
        ".pre-commit-config.yaml",
        ".editorconfig",
        "rustfmt.toml",
        ".rustfmt.toml",
        "clippy.toml",
        ".eslintrc",
        ".eslintrc.json",
        ".prettierrc",
        "mypy.ini",
        "tox.ini",
    ])
}

fn has_dependency_manifest(metadata: &Metadata) -> bool {
    metadata.has_file_named(&[
        "requirements.txt",
        "environment.yml",
        "pipfile",
        "poetry.lock",
        "cargo.toml",
        "package.json",
        "go.mod",
    ])
}

fn has_packaging(metadata: &Metadata) -> bool {
    metadata.has_file_named(&["setup.py", "setup.cfg", "pyproject.toml", "cargo.toml", "package.json", "dockerfile"])
}

impl Metric for CodeQuality {
    fn name(&self) -> &'static str {
        CODE_QUALITY
    }

    #[expect(clippy::cast_precision_loss, reason = "at most five checks")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let checks: [fn(&Metadata) -> bool; 5] = [has_tests, has_ci, has_lint_config, has_dependency_manifest, has_packaging];
        let passed = checks.into_iter().filter(|check| check(metadata)).count();
        Measurement::scalar(passed as f64 * 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_files(files: &[&str]) -> Metadata {
        Metadata {
            repo_files: files.iter().map(ToString::to_string).collect(),
            ..Metadata::default()
        }
    }

    #[test]
    fn empty_repository_scores_zero() {
        assert!(CodeQuality.measure(&Metadata::default()).value.scalar().abs() < f64::EPSILON);
    }

    #[test]
    fn well_kept_python_repository_scores_full() {
        let metadata = with_files(&[
            "tests/test_model.py",
            ".github/workflows/ci.yml",
            "ruff.toml",
            "requirements.txt",
            "pyproject.toml",
        ]);
        assert!((CodeQuality.measure(&metadata).value.scalar() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weights_only_repository_scores_zero() {
        let metadata = with_files(&["model.safetensors", "config.json", "README.md"]);
        assert!(CodeQuality.measure(&metadata).value.scalar().abs() < f64::EPSILON);
    }
}
