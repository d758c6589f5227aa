use super::ReadmeAssessment;
use regex::Regex;
use std::sync::LazyLock;

/// READMEs shorter than this many characters, after trimming, count as missing.
pub const MIN_README_CHARS: usize = 10;

const BASE_SCORE: f64 = 0.5;
const SIGNAL_STEP: f64 = 0.1;

pub const MISSING_README: &str = "missing_readme";
pub const MISSING_LICENSE: &str = "missing_license";
pub const MISSING_INSTALLATION_GUIDE: &str = "missing_installation_guide";
pub const MISSING_EXAMPLES: &str = "missing_examples";
pub const SAFETY_REVIEW_NEEDED: &str = "safety_review_needed";
pub const EXPERIMENTAL_STATUS: &str = "experimental_status";

static LICENSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(licen[cs]e[sd]?|mit|apache|bsd|gpl|cc-by[a-z0-9.-]*|creative commons)\b").expect("invalid regex")
});

static INSTALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(install\w*|setup|set up|usage|how to use|getting started|quick ?start)\b").expect("invalid regex")
});

static EXAMPLES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(examples?|demos?|tutorials?|sample code)\b|```").expect("invalid regex"));

static SAFETY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(safety|bias|biases|biased|ethic\w*|responsible ai|harm\w*|limitations?|misuse)\b").expect("invalid regex")
});

static CAUTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(experimental|deprecated|unmaintained|not for production|not production[- ]ready|use at your own risk)\b")
        .expect("invalid regex")
});

/// A documentation aspect the heuristic looks for.
struct Signal {
    label: &'static str,
    missing_flag: &'static str,
    regex: &'static LazyLock<Regex>,
}

static SIGNALS: [Signal; 4] = [
    Signal {
        label: "license information",
        missing_flag: MISSING_LICENSE,
        regex: &LICENSE_REGEX,
    },
    Signal {
        label: "installation or usage guide",
        missing_flag: MISSING_INSTALLATION_GUIDE,
        regex: &INSTALL_REGEX,
    },
    Signal {
        label: "examples",
        missing_flag: MISSING_EXAMPLES,
        regex: &EXAMPLES_REGEX,
    },
    Signal {
        label: "safety and bias discussion",
        missing_flag: SAFETY_REVIEW_NEEDED,
        regex: &SAFETY_REGEX,
    },
];

/// Assess a README with keyword heuristics alone.
///
/// Starts from 0.5, adds 0.1 for each documented aspect and subtracts 0.1 for cautionary wording. Each missing
/// aspect produces a flag. A README that is effectively empty scores 0 with the single flag `missing_readme`.
#[must_use]
pub fn assess(readme: &str) -> ReadmeAssessment {
    let trimmed = readme.trim();
    if trimmed.chars().count() < MIN_README_CHARS {
        return ReadmeAssessment::new(0.0, "Package includes: no README", vec![MISSING_README.to_string()]);
    }

    let lower = trimmed.to_lowercase();
    let mut score = BASE_SCORE;
    let mut present = Vec::new();
    let mut flags = Vec::new();

    for signal in &SIGNALS {
        if signal.regex.is_match(&lower) {
            score += SIGNAL_STEP;
            present.push(signal.label);
        } else {
            flags.push(signal.missing_flag.to_string());
        }
    }

    if CAUTION_REGEX.is_match(&lower) {
        score -= SIGNAL_STEP;
        flags.push(EXPERIMENTAL_STATUS.to_string());
    }

    let summary = if present.is_empty() {
        "Package includes: no documented sections".to_string()
    } else {
        format!("Package includes: {}", present.join(", "))
    };

    ReadmeAssessment::new(score, summary, flags)
}
