use crate::facts::Metadata;
use crate::metrics::text_signals::{code_block_count, keyword_regex, word_count};
use crate::metrics::weights::RAMP_UP_TIME;
use crate::metrics::{Measurement, Metric};
use regex::Regex;
use std::sync::LazyLock;

/// README length at which the length component saturates.
const FULL_LENGTH_WORDS: f64 = 500.0;

static INSTALL_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&["install*", "requirements", "setup", "set up"]).expect("invalid regex"));
static USAGE_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| keyword_regex(&["usage", "how to use", "quick start", "quickstart", "getting started"]).expect("invalid regex"));
static EXAMPLE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_regex(&["example", "demo", "tutorial"]).expect("invalid regex"));

/// How quickly a newcomer can get productive, judged from the README and accompanying docs.
///
/// | component                           | weight |
/// |-------------------------------------|--------|
/// | README length (saturates at 500 words) | 0.25 |
/// | installation instructions           | 0.20   |
/// | usage instructions                  | 0.20   |
/// | at least one fenced code block      | 0.15   |
/// | examples mentioned                  | 0.10   |
/// | docs, examples, or notebooks shipped | 0.10  |
#[derive(Debug, Clone, Copy, Default)]
pub struct RampUpTime;

impl Metric for RampUpTime {
    fn name(&self) -> &'static str {
        RAMP_UP_TIME
    }

    #[expect(clippy::cast_precision_loss, reason = "word counts are far below 2^52")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let readme = &metadata.readme_text;
        let lower = readme.to_ascii_lowercase();

        let mut score = 0.25 * (word_count(readme) as f64 / FULL_LENGTH_WORDS).min(1.0);

        if INSTALL_KEYWORDS.is_match(&lower) {
            score += 0.20;
        }

        if USAGE_KEYWORDS.is_match(&lower) {
            score += 0.20;
        }

        if code_block_count(readme) > 0 {
            score += 0.15;
        }

        if EXAMPLE_KEYWORDS.is_match(&lower) {
            score += 0.10;
        }

        if metadata.has_file_with_prefix(&["docs/", "doc/", "examples/", "notebooks/"]) || metadata.has_file_with_extension(&[".ipynb"]) {
            score += 0.10;
        }

        Measurement::scalar(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_readme_scores_zero() {
        assert!(RampUpTime.measure(&Metadata::default()).value.scalar().abs() < f64::EPSILON);
    }

    #[test]
    fn structured_readme_scores_high() {
        let body = "word ".repeat(600);
        let metadata = Metadata {
            readme_text: format!("## Installation\n\n```\npip install x\n```\n\n## Usage\n\nSee the example below.\n\n{body}"),
            repo_files: ["examples/run.py".to_string()].into_iter().collect(),
            ..Metadata::default()
        };

        assert!((RampUpTime.measure(&metadata).value.scalar() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn shipped_docs_count_without_a_readme() {
        let metadata = Metadata {
            repo_files: ["docs/index.md".to_string()].into_iter().collect(),
            ..Metadata::default()
        };

        assert!((RampUpTime.measure(&metadata).value.scalar() - 0.1).abs() < 1e-9);
    }
}
