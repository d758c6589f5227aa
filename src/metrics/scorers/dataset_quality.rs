use crate::facts::Metadata;
use crate::metrics::text_signals::keyword_regex;
use crate::metrics::weights::DATASET_QUALITY;
use crate::metrics::{Measurement, Metric};
use regex::Regex;
use std::sync::LazyLock;

/// Documentation aspects a well-described dataset covers, each with the wording that signals it.
const ASPECT_KEYWORDS: &[&[&str]] = &[
    &["source", "collected from", "provenance", "curat*"],
    &["size", "sample", "example", "row", "token"],
    &["split*", "train/", "validation", "test set"],
    &["preprocess*", "cleaning", "filtering", "deduplicat*", "tokeniz*"],
    &["license", "licence"],
    &["bias*", "limitation", "ethical"],
];

static ASPECTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ASPECT_KEYWORDS
        .iter()
        .map(|keywords| keyword_regex(keywords).expect("invalid regex"))
        .collect()
});

static DATA_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_regex(&["data", "dataset"]).expect("invalid regex"));

/// How thoroughly the README documents the data behind the artifact.
///
/// The score is the fraction of documentation aspects covered: source, size, splits, preprocessing, license,
/// and known biases. A README that never mentions data at all scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetQuality;

impl Metric for DatasetQuality {
    fn name(&self) -> &'static str {
        DATASET_QUALITY
    }

    #[expect(clippy::cast_precision_loss, reason = "aspect counts are tiny")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let readme = &metadata.readme_text;
        if !DATA_KEYWORDS.is_match(readme) {
            return Measurement::scalar(0.0);
        }

        let covered = ASPECTS.iter().filter(|aspect| aspect.is_match(readme)).count();
        Measurement::scalar(covered as f64 / ASPECTS.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_without_data_scores_zero() {
        let metadata = Metadata {
            readme_text: "Licensed under MIT. Watch for bias.".to_string(),
            ..Metadata::default()
        };
        assert!(DatasetQuality.measure(&metadata).value.scalar().abs() < f64::EPSILON);
    }

    #[test]
    fn data_inside_other_words_does_not_count() {
        let metadata = Metadata {
            readme_text: "Ships metadata files. Resize images before use; source available.".to_string(),
            ..Metadata::default()
        };
        assert!(DatasetQuality.measure(&metadata).value.scalar().abs() < f64::EPSILON);
    }

    #[test]
    fn covered_aspects_accumulate() {
        let metadata = Metadata {
            readme_text: "## Training data\n\nCollected from public forums. 2M samples with a validation split.".to_string(),
            ..Metadata::default()
        };
        assert!((DatasetQuality.measure(&metadata).value.scalar() - 0.5).abs() < 1e-9);
    }
}
