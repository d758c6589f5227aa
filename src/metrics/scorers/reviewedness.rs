use crate::facts::Metadata;
use crate::metrics::weights::REVIEWEDNESS;
use crate::metrics::{Measurement, Metric};

/// Fraction of added lines that landed through a reviewed pull request. No commit data scores 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reviewedness;

impl Metric for Reviewedness {
    fn name(&self) -> &'static str {
        REVIEWEDNESS
    }

    #[expect(clippy::cast_precision_loss, reason = "line counts only need to be approximate")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let commits = &metadata.vcs_stats.commits;

        let total = commits.iter().fold(0_u64, |sum, c| sum.saturating_add(c.additions));
        if total == 0 {
            return Measurement::scalar(0.0);
        }

        let reviewed = commits
            .iter()
            .filter(|c| c.reviewed)
            .fold(0_u64, |sum, c| sum.saturating_add(c.additions));
        Measurement::scalar(reviewed as f64 / total as f64)
    }
}
