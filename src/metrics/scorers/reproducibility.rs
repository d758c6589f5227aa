use crate::facts::Metadata;
use crate::metrics::text_signals::{code_block_count, keyword_regex};
use crate::metrics::weights::REPRODUCIBILITY;
use crate::metrics::{Measurement, Metric};
use regex::Regex;
use std::sync::LazyLock;

static SETUP_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    keyword_regex(&["pip install", "conda install", "cargo add", "npm install", "requirements", "install*", "docker run"])
        .expect("invalid regex")
});

/// Whether a reader could reproduce the artifact's advertised behavior from the README alone.
///
/// 1.0 when the README has both a fenced code example and setup instructions, 0.5 for either one, 0.0 for
/// neither.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reproducibility;

impl Metric for Reproducibility {
    fn name(&self) -> &'static str {
        REPRODUCIBILITY
    }

    fn measure(&self, metadata: &Metadata) -> Measurement {
        let readme = &metadata.readme_text;
        let has_example = code_block_count(readme) > 0;
        let has_setup = SETUP_KEYWORDS.is_match(readme);

        Measurement::scalar(match (has_example, has_setup) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.5,
            (false, false) => 0.0,
        })
    }
}
