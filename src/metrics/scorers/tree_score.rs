use crate::facts::Metadata;
use crate::metrics::clamp_unit;
use crate::metrics::weights::TREE_SCORE;
use crate::metrics::{Measurement, Metric};

/// Score used when no parent has a known net score.
pub const NEUTRAL_TREE_SCORE: f64 = 0.5;

/// Quality inherited from the artifact's lineage: the mean net score of parents that have already been rated.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScore;

impl Metric for TreeScore {
    fn name(&self) -> &'static str {
        TREE_SCORE
    }

    #[expect(clippy::cast_precision_loss, reason = "lineages are short")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let known: Vec<f64> = metadata
            .lineage
            .iter()
            .filter_map(|parent| parent.net_score)
            .filter(|score| score.is_finite())
            .map(clamp_unit)
            .collect();

        if known.is_empty() {
            return Measurement::scalar(NEUTRAL_TREE_SCORE);
        }

        Measurement::scalar(known.iter().sum::<f64>() / known.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::LineageEntry;

    fn parent(id: &str, net_score: Option<f64>) -> LineageEntry {
        LineageEntry {
            id: id.to_string(),
            net_score,
        }
    }

    #[test]
    fn averages_known_parents() {
        let metadata = Metadata {
            lineage: vec![
                parent("model/base", Some(0.8)),
                parent("dataset/corpus", Some(0.4)),
                parent("model/unrated", None),
            ],
            ..Metadata::default()
        };
        assert!((TreeScore.measure(&metadata).value.scalar() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn unknown_lineage_is_neutral() {
        assert!((TreeScore.measure(&Metadata::default()).value.scalar() - NEUTRAL_TREE_SCORE).abs() < f64::EPSILON);
    }
}
