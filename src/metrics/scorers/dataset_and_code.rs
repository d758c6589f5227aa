use crate::facts::{ArtifactKind, Metadata};
use crate::metrics::text_signals::keyword_regex;
use crate::metrics::weights::DATASET_AND_CODE_SCORE;
use crate::metrics::{Measurement, Metric};
use regex::Regex;
use std::sync::LazyLock;

static DATASET_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&["dataset", "trained on", "training data", "fine-tuned on", "corpus", "corpora"]).expect("invalid regex")
});
static CODE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&["training script", "training code", "evaluation script", "github.com/"]).expect("invalid regex")
});
const SCRIPT_FRAGMENTS: &[&str] = &["train", "finetune", "fine_tune", "eval"];
const SCRIPT_EXTENSIONS: &[&str] = &[".py", ".ipynb", ".sh", ".rs"];

/// Whether the data and code that produced the artifact are available.
///
/// Half the score for a documented training dataset (README wording or a dataset in the lineage), half for
/// training or evaluation code (scripts in the repository or a pointer to them in the README).
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetAndCodeScore;

fn documents_dataset(metadata: &Metadata, lower: &str) -> bool {
    let dataset_prefix = format!("{}/", ArtifactKind::Dataset);
    DATASET_KEYWORDS.is_match(lower) || metadata.lineage.iter().any(|parent| parent.id.starts_with(&dataset_prefix))
}

fn provides_code(metadata: &Metadata, lower: &str) -> bool {
    metadata.has_file_matching(SCRIPT_FRAGMENTS, SCRIPT_EXTENSIONS) || CODE_KEYWORDS.is_match(lower)
}

impl Metric for DatasetAndCodeScore {
    fn name(&self) -> &'static str {
        DATASET_AND_CODE_SCORE
    }

    fn measure(&self, metadata: &Metadata) -> Measurement {
        let lower = metadata.readme_text.to_ascii_lowercase();

        let mut score = 0.0;
        if documents_dataset(metadata, &lower) {
            score += 0.5;
        }

        if provides_code(metadata, &lower) {
            score += 0.5;
        }

        Measurement::scalar(score)
    }
}
