use super::{Findings, MetricValue, Score};
use crate::facts::Metadata;
use core::fmt::Debug;
use std::collections::BTreeMap;
use std::time::Instant;

/// What a metric produces before timing and bounds are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: Score,
    pub findings: Option<Findings>,
}

impl Measurement {
    #[must_use]
    pub const fn scalar(value: f64) -> Self {
        Self {
            value: Score::Scalar(value),
            findings: None,
        }
    }

    #[must_use]
    pub const fn by_target(scores: BTreeMap<String, f64>) -> Self {
        Self {
            value: Score::ByTarget(scores),
            findings: None,
        }
    }

    #[must_use]
    pub fn with_findings(mut self, findings: Findings) -> Self {
        self.findings = Some(findings);
        self
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

/// A named, deterministic scorer over a metadata snapshot.
///
/// Metrics must not mutate shared state and must not perform I/O beyond what the snapshot already holds.
/// The single exception is the augmented README scorer, which bounds its own external call with a timeout.
pub trait Metric: Debug + Send + Sync {
    /// The metric's name, which is also its key in the weight table.
    fn name(&self) -> &'static str;

    /// Compute the raw measurement for `metadata`.
    fn measure(&self, metadata: &Metadata) -> Measurement;

    /// Measure `metadata`, clamp the result into `[0, 1]`, and record how long it took.
    fn score(&self, metadata: &Metadata) -> MetricValue {
        let start = Instant::now();
        let measurement = self.measure(metadata);
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        MetricValue {
            name: self.name().to_string(),
            value: measurement.value.clamped(),
            latency_ms,
            findings: measurement.findings,
        }
    }
}
