//! The built-in metrics.

mod bus_factor;
mod code_quality;
mod dataset_and_code;
mod dataset_quality;
mod license;
mod performance_claims;
mod ramp_up;
mod readme_risk;
mod reproducibility;
mod reviewedness;
mod size;
mod tree_score;

pub use bus_factor::BusFactor;
pub use code_quality::CodeQuality;
pub use dataset_and_code::DatasetAndCodeScore;
pub use dataset_quality::DatasetQuality;
pub use license::LicenseMetric;
pub use performance_claims::PerformanceClaims;
pub use ramp_up::RampUpTime;
pub use readme_risk::{
    EXPERIMENTAL_STATUS, HttpSummaryClient, MAX_FLAGS, MAX_PROMPT_README_CHARS, MAX_SUMMARY_CHARS, MIN_AUGMENTED_README_CHARS,
    MIN_README_CHARS, MISSING_EXAMPLES, MISSING_INSTALLATION_GUIDE, MISSING_LICENSE, MISSING_README, ReadmeAssessment, ReadmeRisk,
    SAFETY_REVIEW_NEEDED, SummaryClient, build_prompt, parse_response,
};
pub use reproducibility::Reproducibility;
pub use reviewedness::Reviewedness;
pub use size::{DEPLOYMENT_TARGETS, SizeScore};
pub use tree_score::{NEUTRAL_TREE_SCORE, TreeScore};
