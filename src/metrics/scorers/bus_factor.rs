use crate::facts::Metadata;
use crate::metrics::weights::BUS_FACTOR;
use crate::metrics::{Measurement, Metric};
use std::collections::BTreeMap;

/// Contributor count at which the bus factor saturates.
const SATURATION: usize = 5;

/// How many people would have to leave before the project stalls.
///
/// Computed as the smallest number of contributors who together account for at least half of all commits,
/// divided by 5 and capped at 1. Per-login commit counts are used when present, otherwise commits are grouped
/// by author.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusFactor;

fn commit_counts(metadata: &Metadata) -> Vec<u64> {
    let stats = &metadata.vcs_stats;
    if !stats.contributors_by_login.is_empty() {
        return stats.contributors_by_login.values().copied().collect();
    }

    let mut by_author: BTreeMap<&str, u64> = BTreeMap::new();
    for commit in &stats.commits {
        *by_author.entry(commit.author.as_str()).or_default() += 1;
    }

    by_author.into_values().collect()
}

/// Smallest number of contributors whose commits reach half of the total.
fn key_contributors(mut counts: Vec<u64>) -> usize {
    let total = counts.iter().fold(0_u64, |sum, count| sum.saturating_add(*count));
    if total == 0 {
        return 0;
    }

    let half = total - total / 2;
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let mut covered = 0_u64;
    for (index, count) in counts.iter().enumerate() {
        covered = covered.saturating_add(*count);
        if covered >= half {
            return index + 1;
        }
    }

    counts.len()
}

impl Metric for BusFactor {
    fn name(&self) -> &'static str {
        BUS_FACTOR
    }

    #[expect(clippy::cast_precision_loss, reason = "contributor counts are tiny")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let key = key_contributors(commit_counts(metadata)).min(SATURATION);
        Measurement::scalar(key as f64 / SATURATION as f64)
    }
}
