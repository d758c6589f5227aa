//! README risk assessment.
//!
//! The assessment always has the same shape: a score, a short summary, and up to five risk flags. It is
//! produced by a keyword heuristic, or, when a [`SummaryClient`] is configured, by a generative model whose
//! answer is parsed and scored. Any trouble with the model (an error, a timeout, an unparseable answer) or a
//! README too short to be worth summarizing falls back to the heuristic.

mod augmented;
mod heuristic;
mod http_client;

use crate::Result;
use crate::config::Config;
use crate::facts::Metadata;
use crate::metrics::weights::README_RISK;
use crate::metrics::{Findings, Measurement, Metric, clamp_unit};
use core::fmt::Debug;

pub use augmented::{MAX_PROMPT_README_CHARS, MIN_AUGMENTED_README_CHARS, build_prompt, parse_response};
pub use heuristic::{
    EXPERIMENTAL_STATUS, MIN_README_CHARS, MISSING_EXAMPLES, MISSING_INSTALLATION_GUIDE, MISSING_LICENSE, MISSING_README,
    SAFETY_REVIEW_NEEDED,
};
pub use http_client::HttpSummaryClient;

const LOG_TARGET: &str = "    readme";

/// Longest summary kept in an assessment, in characters.
pub const MAX_SUMMARY_CHARS: usize = 200;

/// Most flags kept in an assessment.
pub const MAX_FLAGS: usize = 5;

/// A generative text client.
///
/// Implementations are called from blocking worker threads and must bound their own running time.
pub trait SummaryClient: Debug + Send + Sync {
    /// Complete `prompt`, returning the generated text.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// The outcome of assessing one README.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadmeAssessment {
    pub score: f64,
    pub summary: String,
    pub flags: Vec<String>,
}

impl ReadmeAssessment {
    /// Build an assessment, clamping the score and capping the summary and flag list.
    #[must_use]
    pub fn new(score: f64, summary: impl Into<String>, mut flags: Vec<String>) -> Self {
        let summary: String = summary.into();
        let summary = if summary.chars().count() > MAX_SUMMARY_CHARS {
            summary.chars().take(MAX_SUMMARY_CHARS).collect()
        } else {
            summary
        };

        flags.truncate(MAX_FLAGS);

        Self {
            score: clamp_unit(score),
            summary,
            flags,
        }
    }
}

/// The README risk metric. Reported with every rating but not part of the net score.
#[derive(Debug)]
pub struct ReadmeRisk {
    client: Option<Box<dyn SummaryClient>>,
}

impl ReadmeRisk {
    /// A README risk metric that only uses the keyword heuristic.
    #[must_use]
    pub const fn heuristic() -> Self {
        Self { client: None }
    }

    /// A README risk metric that asks `client` first and falls back to the heuristic.
    #[must_use]
    pub fn augmented(client: impl SummaryClient + 'static) -> Self {
        Self {
            client: Some(Box::new(client)),
        }
    }

    /// Build the metric described by `config`.
    ///
    /// Augmented mode needs the feature flag and a model id. If the HTTP client cannot be created, the metric
    /// runs in heuristic mode.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let Some(model) = config.augmented_model() else {
            return Self::heuristic();
        };

        match HttpSummaryClient::new(&config.augmented_endpoint, model, config.augmented_timeout()) {
            Ok(client) => Self::augmented(client),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Augmented README summaries are unavailable, using the heuristic: {e:#}");
                Self::heuristic()
            }
        }
    }

    #[must_use]
    pub const fn is_augmented(&self) -> bool {
        self.client.is_some()
    }

    /// Assess `readme`.
    #[must_use]
    pub fn assess(&self, readme: &str) -> ReadmeAssessment {
        if let Some(client) = &self.client
            && readme.trim().chars().count() >= MIN_AUGMENTED_README_CHARS
        {
            match client.generate(&build_prompt(readme)) {
                Ok(response) => {
                    if let Some(assessment) = augmented::assess_response(&response) {
                        return assessment;
                    }

                    log::debug!(target: LOG_TARGET, "Summary response was not in the expected format, using the heuristic");
                }
                Err(e) => log::debug!(target: LOG_TARGET, "Summary request failed, using the heuristic: {e:#}"),
            }
        }

        heuristic::assess(readme)
    }
}

impl Metric for ReadmeRisk {
    fn name(&self) -> &'static str {
        README_RISK
    }

    fn measure(&self, metadata: &Metadata) -> Measurement {
        let assessment = self.assess(&metadata.readme_text);
        Measurement::scalar(assessment.score).with_findings(Findings {
            summary: assessment.summary,
            flags: assessment.flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohno::app_err;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct CannedClient {
        reply: Result<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn replying(reply: Result<String>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl SummaryClient for CannedClient {
        fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(app_err!("{e}")),
            }
        }
    }

    fn long_readme() -> String {
        format!("This model is licensed under Apache. See the usage section. {}", "More details follow. ".repeat(10))
    }

    #[test]
    fn augmented_mode_uses_the_client_answer() {
        let metric = ReadmeRisk::augmented(CannedClient::replying(Ok(
            "SUMMARY: A sentiment model for product reviews.\nRISK_FLAGS: none".to_string()
        )));

        let assessment = metric.assess(&long_readme());
        assert_eq!(assessment.summary, "A sentiment model for product reviews.");
        assert!(assessment.flags.is_empty());
        assert!(assessment.score > 0.5);
    }

    #[test]
    fn client_errors_fall_back_to_the_heuristic() {
        let metric = ReadmeRisk::augmented(CannedClient::replying(Err(app_err!("connection refused"))));
        assert_eq!(metric.assess(&long_readme()), heuristic::assess(&long_readme()));
    }

    #[test]
    fn malformed_answers_fall_back_to_the_heuristic() {
        let metric = ReadmeRisk::augmented(CannedClient::replying(Ok("Sure! Here is a summary.".to_string())));
        assert_eq!(metric.assess(&long_readme()), heuristic::assess(&long_readme()));
    }

    #[test]
    fn short_readmes_skip_the_client() {
        let client = CannedClient::replying(Ok("SUMMARY: x\nRISK_FLAGS: none".to_string()));
        let metric = ReadmeRisk::augmented(client);
        let readme = "Apache licensed. See usage.";

        assert_eq!(metric.assess(readme), heuristic::assess(readme));
    }

    #[test]
    fn heuristic_mode_reports_findings() {
        let value = ReadmeRisk::heuristic().score(&Metadata::default());
        let findings = value.findings.unwrap();
        assert_eq!(findings.flags, vec![MISSING_README]);
        assert!(findings.summary.starts_with("Package includes:"));
    }

    #[test]
    fn disabled_config_yields_heuristic_mode() {
        assert!(!ReadmeRisk::from_config(&Config::default()).is_augmented());

        let config = Config {
            enable_augmented_summary: true,
            augmented_model_id: Some("llama3.2".to_string()),
            ..Config::default()
        };
        assert!(ReadmeRisk::from_config(&config).is_augmented());
    }

    #[test]
    fn long_summaries_are_truncated() {
        let assessment = ReadmeAssessment::new(2.0, "s".repeat(500), (0..9).map(|i| i.to_string()).collect());
        assert_eq!(assessment.summary.chars().count(), MAX_SUMMARY_CHARS);
        assert_eq!(assessment.flags.len(), MAX_FLAGS);
        assert!((assessment.score - 1.0).abs() < f64::EPSILON);
    }
}
