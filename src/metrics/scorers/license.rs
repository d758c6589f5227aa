use crate::facts::Metadata;
use crate::license::check;
use crate::metrics::text_signals::section;
use crate::metrics::weights::LICENSE;
use crate::metrics::{Findings, Measurement, Metric};

/// Compatibility of the artifact's declared license with the consuming project's license.
#[derive(Debug, Clone)]
pub struct LicenseMetric {
    target_license: String,
    use_case: String,
}

impl LicenseMetric {
    #[must_use]
    pub fn new(target_license: impl Into<String>, use_case: impl Into<String>) -> Self {
        Self {
            target_license: target_license.into(),
            use_case: use_case.into(),
        }
    }
}

/// The license the artifact declares: its license text, else the first line of the README's license section.
fn declared_license(metadata: &Metadata) -> Option<String> {
    let text = metadata.license_text.trim();
    if !text.is_empty() {
        return Some(text.to_string());
    }

    section(&metadata.readme_text, &["license", "licence"])
        .and_then(|body| body.lines().map(str::trim).find(|line| !line.is_empty()).map(ToString::to_string))
}

impl Metric for LicenseMetric {
    fn name(&self) -> &'static str {
        LICENSE
    }

    fn measure(&self, metadata: &Metadata) -> Measurement {
        let declared = declared_license(metadata);
        let decision = check(declared.as_deref(), Some(&self.target_license), &self.use_case);

        Measurement::scalar(decision.score()).with_findings(Findings {
            summary: decision.reason,
            flags: decision.restrictions,
        })
    }
}
