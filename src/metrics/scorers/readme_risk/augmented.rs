use super::ReadmeAssessment;

/// README text beyond this many characters is not sent to the generative client.
pub const MAX_PROMPT_README_CHARS: usize = 3000;

/// READMEs shorter than this are assessed with the heuristic alone.
pub const MIN_AUGMENTED_README_CHARS: usize = 100;

/// Summary length at which the summary component of the score saturates.
const FULL_SUMMARY_CHARS: f64 = 150.0;

/// Number of risk flags tolerated before each further flag costs 0.1.
const FREE_FLAGS: usize = 2;

const SUMMARY_PREFIX: &str = "SUMMARY:";
const FLAGS_PREFIX: &str = "RISK_FLAGS:";

/// Build the prompt sent to the generative client.
#[must_use]
pub fn build_prompt(readme: &str) -> String {
    let readme: String = readme.chars().take(MAX_PROMPT_README_CHARS).collect();
    format!(
        "You review README files of machine learning artifacts before they are published to a registry.\n\
         Summarize what the artifact provides in at most two sentences, then list risk flags such as \
         missing_license, missing_installation_guide, missing_examples, safety_review_needed, or experimental_status.\n\
         Reply in exactly this format and nothing else:\n\
         {SUMMARY_PREFIX} <summary>\n\
         {FLAGS_PREFIX} <comma-separated flags, or none>\n\n\
         README:\n{readme}"
    )
}

/// Extract the summary and flags from a client response.
///
/// Returns `None` when either line is missing or the summary is empty.
#[must_use]
pub fn parse_response(response: &str) -> Option<(String, Vec<String>)> {
    let mut summary = None;
    let mut flags = None;

    for line in response.lines() {
        let line = line.trim().trim_start_matches(['*', '-', ' ']);
        if let Some(rest) = strip_prefix_ignore_case(line, SUMMARY_PREFIX) {
            summary = Some(rest.trim().to_string());
        } else if let Some(rest) = strip_prefix_ignore_case(line, FLAGS_PREFIX) {
            flags = Some(parse_flags(rest));
        }
    }

    let summary = summary.filter(|s| !s.is_empty())?;
    Some((summary, flags?))
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) { line.get(prefix.len()..) } else { None }
}

fn parse_flags(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Vec::new();
    }

    text.split(',')
        .map(|flag| flag.trim().trim_matches(['"', '\'', '`', '.']).to_ascii_lowercase().replace([' ', '-'], "_"))
        .filter(|flag| !flag.is_empty() && flag != "none")
        .collect()
}

/// Score an augmented summary: 0.5, plus up to 0.3 for summary length, minus 0.1 per flag beyond the first two.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "lengths and flag counts are small")]
pub fn score(summary: &str, flag_count: usize) -> f64 {
    let length = summary.chars().count() as f64;
    let extra_flags = flag_count.saturating_sub(FREE_FLAGS) as f64;
    0.5 + 0.3 * (length / FULL_SUMMARY_CHARS).min(1.0) - 0.1 * extra_flags
}

/// Turn a client response into an assessment, or `None` if the response is malformed.
#[must_use]
pub fn assess_response(response: &str) -> Option<ReadmeAssessment> {
    let (summary, flags) = parse_response(response)?;
    let capped = ReadmeAssessment::new(0.0, summary, flags);
    let score = score(&capped.summary, capped.flags.len());
    Some(ReadmeAssessment::new(score, capped.summary, capped.flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_truncates_long_readmes() {
        let readme = "x".repeat(MAX_PROMPT_README_CHARS * 2);
        let prompt = build_prompt(&readme);
        assert_eq!(prompt.matches('x').count(), MAX_PROMPT_README_CHARS);
        assert!(prompt.contains("RISK_FLAGS:"));
    }

    #[test]
    fn parses_well_formed_responses() {
        let (summary, flags) = parse_response("SUMMARY: A text classifier.\nRISK_FLAGS: missing_license, Safety Review Needed").unwrap();
        assert_eq!(summary, "A text classifier.");
        assert_eq!(flags, vec!["missing_license", "safety_review_needed"]);
    }

    #[test]
    fn none_means_no_flags() {
        let (_, flags) = parse_response("Summary: fine\nrisk_flags: none").unwrap();
        assert!(flags.is_empty());
    }

    #[test]
    fn rejects_malformed_responses() {
        assert_eq!(parse_response("I cannot help with that."), None);
        assert_eq!(parse_response("SUMMARY: only a summary"), None);
        assert_eq!(parse_response("SUMMARY:\nRISK_FLAGS: none"), None);
    }

    #[test]
    fn score_rewards_length_and_penalizes_many_flags() {
        assert!((score("", 0) - 0.5).abs() < 1e-9);
        assert!((score(&"s".repeat(300), 2) - 0.8).abs() < 1e-9);
        assert!((score(&"s".repeat(75), 4) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn assessment_is_clamped_and_capped() {
        let response = "SUMMARY: short\nRISK_FLAGS: a, b, c, d, e, f, g, h, i";
        let assessment = assess_response(response).unwrap();
        assert_eq!(assessment.flags.len(), super::super::MAX_FLAGS);
        assert!((0.0..=1.0).contains(&assessment.score));
    }
}
