use super::RatingResult;
use crate::metrics::weights::WEIGHTS;
use crate::metrics::{MetricValue, clamp_unit};
use std::collections::BTreeMap;
use std::time::Instant;

/// Weighted sum of the metric values named in the weight table, rounded to two decimals and clamped to `[0, 1]`.
///
/// Metrics absent from `per_metric` are skipped rather than counted as zero. Per-target values contribute
/// their mean.
#[must_use]
pub fn net_score(per_metric: &BTreeMap<String, MetricValue>) -> f64 {
    let total: f64 = WEIGHTS
        .iter()
        .filter_map(|(name, weight)| per_metric.get(*name).map(|value| value.value.scalar() * weight))
        .sum();

    clamp_unit(round2(total))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Combine per-metric values into a [`RatingResult`], timing the aggregation itself.
#[must_use]
pub fn aggregate(per_metric: BTreeMap<String, MetricValue>) -> RatingResult {
    let start = Instant::now();
    let net_score = net_score(&per_metric);
    let net_score_latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    RatingResult {
        per_metric,
        net_score,
        net_score_latency_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Score;
    use crate::metrics::weights::{BUS_FACTOR, LICENSE, README_RISK, SIZE_SCORE};

    fn value(name: &str, score: Score) -> (String, MetricValue) {
        (
            name.to_string(),
            MetricValue {
                name: name.to_string(),
                value: score,
                latency_ms: 1,
                findings: None,
            },
        )
    }

    #[test]
    fn all_perfect_metrics_score_one() {
        let per_metric = WEIGHTS.iter().map(|(name, _)| value(name, Score::Scalar(1.0))).collect();
        assert!((net_score(&per_metric) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn size_maps_contribute_their_mean() {
        let sizes = [("a".to_string(), 1.0), ("b".to_string(), 0.0)].into_iter().collect();
        let per_metric = [value(SIZE_SCORE, Score::ByTarget(sizes))].into_iter().collect();

        // 0.08 * 0.5
        assert!((net_score(&per_metric) - 0.04).abs() < 1e-9);
    }

    #[test]
    fn absent_metrics_are_skipped() {
        let per_metric = [value(LICENSE, Score::Scalar(1.0)), value(BUS_FACTOR, Score::Scalar(1.0))].into_iter().collect();
        assert!((net_score(&per_metric) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn readme_risk_does_not_move_the_score() {
        let base: BTreeMap<_, _> = [value(LICENSE, Score::Scalar(1.0))].into_iter().collect();
        let mut with_risk = base.clone();
        let (name, risk) = value(README_RISK, Score::Scalar(1.0));
        let _ = with_risk.insert(name, risk);

        assert!((net_score(&base) - net_score(&with_risk)).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let per_metric = [value(LICENSE, Score::Scalar(0.333))].into_iter().collect();
        assert!((net_score(&per_metric) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn empty_input_scores_zero() {
        let result = aggregate(BTreeMap::new());
        assert!(result.net_score.abs() < f64::EPSILON);
        assert!(result.per_metric.is_empty());
    }
}
