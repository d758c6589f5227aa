use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The numeric outcome of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// A single score in `[0, 1]`.
    Scalar(f64),

    /// One score in `[0, 1]` per deployment target.
    ByTarget(BTreeMap<String, f64>),
}

impl Score {
    /// Collapse the score into a single number.
    ///
    /// Per-target scores collapse to their arithmetic mean; an empty map collapses to 0.0.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "target counts are tiny")]
    pub fn scalar(&self) -> f64 {
        match self {
            Self::Scalar(value) => *value,
            Self::ByTarget(map) if map.is_empty() => 0.0,
            Self::ByTarget(map) => map.values().sum::<f64>() / map.len() as f64,
        }
    }

    /// Clamp every component into `[0, 1]`, mapping NaN to 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        match self {
            Self::Scalar(value) => Self::Scalar(clamp_unit(value)),
            Self::ByTarget(map) => Self::ByTarget(map.into_iter().map(|(k, v)| (k, clamp_unit(v))).collect()),
        }
    }
}

/// Clamp a value into `[0, 1]`, mapping NaN to 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Qualitative output that accompanies some metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub summary: String,
    pub flags: Vec<String>,
}

/// The result of running one metric against one metadata snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub name: String,
    pub value: Score,
    pub latency_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<Findings>,
}

impl MetricValue {
    /// The value recorded for a metric that failed to produce a result.
    #[must_use]
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Score::Scalar(0.0),
            latency_ms: 0,
            findings: None,
        }
    }
}
