//! Metric names and the fixed weight table used to compute net scores.

pub const LICENSE: &str = "license";
pub const RAMP_UP_TIME: &str = "ramp_up_time";
pub const BUS_FACTOR: &str = "bus_factor";
pub const PERFORMANCE_CLAIMS: &str = "performance_claims";
pub const SIZE_SCORE: &str = "size_score";
pub const DATASET_AND_CODE_SCORE: &str = "dataset_and_code_score";
pub const DATASET_QUALITY: &str = "dataset_quality";
pub const CODE_QUALITY: &str = "code_quality";
pub const REPRODUCIBILITY: &str = "reproducibility";
pub const REVIEWEDNESS: &str = "reviewedness";
pub const TREE_SCORE: &str = "tree_score";
pub const README_RISK: &str = "readme_risk";

/// Weight of each metric in the net score. The weights sum to 1.0.
///
/// `readme_risk` is deliberately absent: it is reported alongside the other metrics but does not move the net score.
pub const WEIGHTS: &[(&str, f64)] = &[
    (LICENSE, 0.15),
    (RAMP_UP_TIME, 0.12),
    (BUS_FACTOR, 0.10),
    (PERFORMANCE_CLAIMS, 0.10),
    (SIZE_SCORE, 0.08),
    (DATASET_AND_CODE_SCORE, 0.08),
    (DATASET_QUALITY, 0.09),
    (CODE_QUALITY, 0.08),
    (REPRODUCIBILITY, 0.10),
    (REVIEWEDNESS, 0.05),
    (TREE_SCORE, 0.05),
];

/// The net-score weight of `name`, if it has one.
#[must_use]
pub fn weight_of(name: &str) -> Option<f64> {
    WEIGHTS.iter().find(|(n, _)| *n == name).map(|(_, w)| *w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn readme_risk_is_unweighted() {
        assert_eq!(weight_of(README_RISK), None);
        assert_eq!(weight_of(LICENSE), Some(0.15));
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = WEIGHTS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WEIGHTS.len());
    }
}
