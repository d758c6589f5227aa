use crate::facts::Metadata;
use crate::metrics::text_signals::{count_distinct, has_table, keyword_regex};
use crate::metrics::weights::PERFORMANCE_CLAIMS;
use crate::metrics::{Measurement, Metric};
use regex::Regex;
use std::sync::LazyLock;

static EVALUATION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&["benchmark", "evaluation", "evaluated", "results", "leaderboard", "state-of-the-art", "sota"])
        .expect("invalid regex")
});

static METRIC_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&[
        "accuracy",
        "f1",
        "bleu",
        "rouge",
        "perplexity",
        "precision",
        "recall",
        "auc",
        "exact match",
        "wer",
        "mmlu",
    ])
    .expect("invalid regex")
});

static NUMERIC_RESULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}(\.\d+)?\s?%|\b0\.\d{2,}\b").expect("invalid regex"));

/// Evidence in the README that the artifact's performance has been measured.
///
/// Evaluation wording contributes 0.3, named metrics up to 0.3 (two or more saturate), numeric results 0.2,
/// and a results table 0.2.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClaims;

impl Metric for PerformanceClaims {
    fn name(&self) -> &'static str {
        PERFORMANCE_CLAIMS
    }

    #[expect(clippy::cast_precision_loss, reason = "keyword counts are tiny")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let readme = &metadata.readme_text;
        let lower = readme.to_ascii_lowercase();

        let mut score = 0.0;

        if EVALUATION_KEYWORDS.is_match(&lower) {
            score += 0.3;
        }

        score += 0.3 * (count_distinct(&METRIC_NAMES, &lower) as f64 / 2.0).min(1.0);

        if NUMERIC_RESULT_REGEX.is_match(&lower) {
            score += 0.2;
        }

        if has_table(readme) {
            score += 0.2;
        }

        Measurement::scalar(score)
    }
}
