use crate::facts::ArtifactId;
use crate::metrics::MetricValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::{Display, IntoStaticStr};

/// The outcome of one completed rating computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResult {
    pub per_metric: BTreeMap<String, MetricValue>,
    pub net_score: f64,
    pub net_score_latency_ms: u64,
}

/// Lifecycle state of an artifact's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    Pending,
    Completed,
    Disqualified,
    Failed,
}

impl RatingStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// How a rating cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    Completed(Arc<RatingResult>),
    Disqualified(Arc<RatingResult>),
    Failed(Arc<str>),
}

impl Terminal {
    #[must_use]
    pub const fn status(&self) -> RatingStatus {
        match self {
            Self::Completed(_) => RatingStatus::Completed,
            Self::Disqualified(_) => RatingStatus::Disqualified,
            Self::Failed(_) => RatingStatus::Failed,
        }
    }
}

/// A point-in-time copy of an artifact's rating record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSnapshot {
    pub id: ArtifactId,
    pub status: RatingStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Arc<RatingResult>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Arc<str>>,

    pub started_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Rating cycle this snapshot belongs to, starting at 1.
    pub cycle: u64,
}

/// Why a rating could not be provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailability {
    /// The rating computation failed; the message says why.
    Failed(Arc<str>),

    /// The rating is still being computed and the wait timed out.
    TimedOut,
}

/// What a caller of [`RatingCoordinator::rate`](super::RatingCoordinator::rate) observes.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingOutcome {
    Completed(Arc<RatingResult>),
    Disqualified(Arc<RatingResult>),
    Unavailable(Unavailability),
}

impl RatingOutcome {
    /// The rating result, for outcomes that have one.
    #[must_use]
    pub fn result(&self) -> Option<&Arc<RatingResult>> {
        match self {
            Self::Completed(result) | Self::Disqualified(result) => Some(result),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl From<Terminal> for RatingOutcome {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::Completed(result) => Self::Completed(result),
            Terminal::Disqualified(result) => Self::Disqualified(result),
            Terminal::Failed(reason) => Self::Unavailable(Unavailability::Failed(reason)),
        }
    }
}
