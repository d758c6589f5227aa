use crate::facts::Metadata;
use crate::metrics::weights::SIZE_SCORE;
use crate::metrics::{Measurement, Metric};
use std::collections::BTreeMap;

const GB: f64 = 1_000_000_000.0;

/// Deployment targets and the artifact size each can comfortably hold, in bytes.
pub const DEPLOYMENT_TARGETS: &[(&str, f64)] = &[
    ("raspberry_pi", 2.0 * GB),
    ("jetson_nano", 4.0 * GB),
    ("desktop_pc", 16.0 * GB),
    ("aws_server", 64.0 * GB),
];

/// Score given to every target when the artifact declares no size.
const UNKNOWN_SIZE_SCORE: f64 = 0.5;

/// How well the artifact fits each deployment target.
///
/// The largest declared size is compared with each target's budget: `1 - size / budget`, floored at 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeScore;

impl Metric for SizeScore {
    fn name(&self) -> &'static str {
        SIZE_SCORE
    }

    #[expect(clippy::cast_precision_loss, reason = "sizes only need to be approximate")]
    fn measure(&self, metadata: &Metadata) -> Measurement {
        let largest = metadata.declared_sizes_by_platform.values().copied().filter(|size| *size > 0).max();

        let scores: BTreeMap<String, f64> = DEPLOYMENT_TARGETS
            .iter()
            .map(|(target, budget)| {
                let score = largest.map_or(UNKNOWN_SIZE_SCORE, |size| (1.0 - size as f64 / budget).max(0.0));
                ((*target).to_string(), score)
            })
            .collect();

        Measurement::by_target(scores)
    }
}
