//! Small text-scanning helpers shared by the README-driven metrics.
//!
//! Keyword matching is case-insensitive and respects word boundaries.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TABLE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)+\|?$").expect("invalid regex"));

/// Builds a case-insensitive matcher for whole keywords.
///
/// Each keyword matches as a whole word, optionally followed by a plural `s`. A trailing `*` marks a stem that
/// matches any word starting with it, so `install*` finds "installation" but `wer` never finds "answer".
///
/// # Errors
///
/// Returns an error if the combined pattern exceeds the regex size limits
pub fn keyword_regex(keywords: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<_> = keywords.iter().map(|keyword| keyword_pattern(keyword)).collect();
    Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
}

fn keyword_pattern(keyword: &str) -> String {
    let (word, stem) = keyword.strip_suffix('*').map_or((keyword, false), |word| (word, true));
    let mut pattern = String::new();

    if word.starts_with(|c: char| c.is_alphanumeric()) {
        pattern.push_str(r"\b");
    }

    pattern.push_str(&regex::escape(word));

    if stem {
        pattern.push_str(r"\w*");
    } else if word.ends_with(|c: char| c.is_alphanumeric()) {
        pattern.push_str(r"s?\b");
    }

    pattern
}

/// Number of distinct keywords `regex` finds in `text`, with singular and plural forms counted once.
#[must_use]
pub fn count_distinct(regex: &Regex, text: &str) -> usize {
    regex
        .find_iter(text)
        .map(|m| {
            let found = m.as_str().to_ascii_lowercase();
            match found.strip_suffix('s') {
                Some(singular) => singular.to_string(),
                None => found,
            }
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Number of fenced code blocks in a markdown document.
#[must_use]
pub fn code_block_count(text: &str) -> usize {
    let fences = text.lines().filter(|line| line.trim_start().starts_with("```")).count();
    fences / 2
}

/// Returns `true` if the document contains a markdown table.
#[must_use]
pub fn has_table(text: &str) -> bool {
    text.lines().any(|line| TABLE_SEPARATOR_REGEX.is_match(line.trim()))
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The body of the first markdown section whose heading contains one of `keywords`.
///
/// The body runs until the next heading of the same or a higher level. Returns `None` when no heading matches
/// or when the matching section is empty.
#[must_use]
pub fn section(text: &str, keywords: &[&str]) -> Option<String> {
    let mut level = None;
    let mut body = Vec::new();

    for line in text.lines() {
        let heading = heading_level(line);

        match (level, heading) {
            (None, Some(l)) => {
                let title = line.to_ascii_lowercase();
                if keywords.iter().any(|keyword| title.contains(keyword)) {
                    level = Some(l);
                }
            }
            (Some(current), Some(l)) if l <= current => break,
            (Some(_), _) => body.push(line),
            (None, None) => {}
        }
    }

    let body = body.join("\n");
    let body = body.trim();
    (!body.is_empty()).then(|| body.to_string())
}

fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    let rest = trimmed.trim_start_matches('#');
    (level > 0 && level <= 6 && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const README: &str = "# Model\n\nIntro text.\n\n## Installation\n\n```bash\npip install thing\n```\n\n### Extras\n\nmore\n\n## License\n\nApache 2.0\n";

    #[test]
    fn finds_sections_by_heading_keyword() {
        let install = section(README, &["install"]).unwrap();
        assert!(install.contains("pip install"));
        assert!(install.contains("Extras"), "nested headings belong to the section");
        assert!(!install.contains("Apache"));

        assert_eq!(section(README, &["license"]).as_deref(), Some("Apache 2.0"));
        assert_eq!(section(README, &["citation"]), None);
    }

    #[test]
    fn counts_code_blocks() {
        assert_eq!(code_block_count(README), 1);
        assert_eq!(code_block_count("no code"), 0);
    }

    #[test]
    fn detects_tables() {
        assert!(has_table("| metric | value |\n|---|---|\n| f1 | 0.9 |"));
        assert!(has_table("metric | value\n--- | ---\nf1 | 0.9"));
        assert!(!has_table("just --- a rule"));
    }

    #[test]
    fn keywords_match_whole_words() {
        let regex = keyword_regex(&["wer", "sota", "data"]).unwrap();
        assert!(!regex.is_match("A powerful model. However, the answer is lower quality in Minnesota."));
        assert!(!regex.is_match("Ships with metadata."));
        assert!(regex.is_match("WER of 4.1 on LibriSpeech"));
        assert!(regex.is_match("New SOTA results"));
        assert!(regex.is_match("Training data: public forums"));
    }

    #[test]
    fn stems_and_plurals_match() {
        let regex = keyword_regex(&["install*", "example", "github.com/"]).unwrap();
        assert!(regex.is_match("## Installation"));
        assert!(regex.is_match("See the examples."));
        assert!(regex.is_match("code at https://github.com/acme/tool"));
        assert!(!regex.is_match("a counterexample"));
    }

    #[test]
    fn distinct_keywords_are_counted_once() {
        let regex = keyword_regex(&["accuracy", "recall", "f1"]).unwrap();
        assert_eq!(count_distinct(&regex, "Accuracy 0.9, accuracy on test, recalls 0.8"), 2);
        assert_eq!(count_distinct(&regex, "however"), 0);
    }

    #[test]
    fn hashtags_are_not_headings() {
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("## Usage"), Some(2));
    }
}
