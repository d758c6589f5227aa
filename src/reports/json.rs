use super::ReportEntry;
use crate::Result;
use crate::facts::ArtifactId;
use crate::metrics::MetricValue;
use crate::rating::{RatingOutcome, Unavailability};
use ohno::IntoAppError;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    id: &'a ArtifactId,
    status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    net_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    net_score_latency_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    per_metric: Option<&'a BTreeMap<String, MetricValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> From<&'a ReportEntry> for JsonEntry<'a> {
    fn from(entry: &'a ReportEntry) -> Self {
        let mut json = JsonEntry {
            id: &entry.id,
            status: "",
            net_score: None,
            net_score_latency_ms: None,
            per_metric: None,
            reason: None,
        };

        match &entry.outcome {
            RatingOutcome::Completed(result) | RatingOutcome::Disqualified(result) => {
                json.status = if entry.outcome.is_completed() { "completed" } else { "disqualified" };
                json.net_score = Some(result.net_score);
                json.net_score_latency_ms = Some(result.net_score_latency_ms);
                json.per_metric = Some(&result.per_metric);
            }
            RatingOutcome::Unavailable(Unavailability::Failed(reason)) => {
                json.status = "failed";
                json.reason = Some(&**reason);
            }
            RatingOutcome::Unavailable(Unavailability::TimedOut) => {
                json.status = "unavailable";
                json.reason = Some("the rating is still being computed");
            }
        }

        json
    }
}

/// Render `entries` as a pretty-printed JSON array.
pub fn generate(entries: &[ReportEntry]) -> Result<String> {
    let entries: Vec<JsonEntry<'_>> = entries.iter().map(JsonEntry::from).collect();
    serde_json::to_string_pretty(&entries).into_app_err("serializing the rating report to JSON")
}
