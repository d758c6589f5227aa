use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::Display;

/// Token for an artifact without a usable license.
pub const NO_LICENSE: &str = "no-license";

/// Longest fallback token derived from free text.
const MAX_SLUG_LEN: usize = 64;

/// Words that mean "no license" rather than naming one.
const NO_LICENSE_PHRASES: &[&str] = &[
    "no-license",
    "no license",
    "none",
    "unknown",
    "unlicensed",
    "n/a",
    "na",
    "noassertion",
    "not specified",
    "other",
];

static MIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(mit|expat)\b").expect("invalid regex"));
static MPL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmpl\b|mpl-[0-9]|mozilla public").expect("invalid regex"));
static BSD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bbsd\b|bsd-[0-9]").expect("invalid regex"));
static GPL_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:gpl|general public license)[-_ .,(]*(?:v|version)?[-_ .]*([0-9])").expect("invalid regex")
});

/// Broad families of licenses that drive compatibility decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseClass {
    Permissive,
    Copyleft,
    NoLicense,
    Unknown,
}

/// A license string reduced to a token and its family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLicense {
    pub token: String,
    pub class: LicenseClass,
}

/// Reduce free-text or SPDX-style license text to a short token.
///
/// Well-known licenses map to `mit`, `apache-2`, `bsd`, `gpl-2`, `gpl-3`, `lgpl-2.1`, `lgpl-3`, `agpl-3`, or `mpl-2`.
/// Empty text and phrases such as "none" map to [`NO_LICENSE`]. Anything else yields a best-effort token: the
/// lowercased SPDX identifier when the text names one, otherwise a slug of the text itself.
#[must_use]
pub fn normalize(license_text: &str) -> String {
    analyze(license_text).token
}

/// Classify a license string into a [`NormalizedLicense`].
#[must_use]
pub fn analyze(license_text: &str) -> NormalizedLicense {
    let lower = license_text.trim().to_ascii_lowercase();

    if lower.is_empty() || NO_LICENSE_PHRASES.contains(&lower.as_str()) {
        return known(NO_LICENSE, LicenseClass::NoLicense);
    }

    if let Some(token) = match_known_family(&lower) {
        let class = class_of_known(token);
        return known(token, class);
    }

    if let Some(license) = spdx_lookup(license_text.trim()) {
        return license;
    }

    let token = slug(&lower);
    if token.is_empty() {
        known(NO_LICENSE, LicenseClass::NoLicense)
    } else {
        NormalizedLicense {
            token,
            class: LicenseClass::Unknown,
        }
    }
}

fn known(token: &str, class: LicenseClass) -> NormalizedLicense {
    NormalizedLicense {
        token: token.to_string(),
        class,
    }
}

/// The major version written right after a GPL-family name, such as the `2` in "GPLv2" or "LGPL-2.1".
fn gpl_version(lower: &str) -> Option<char> {
    GPL_VERSION_REGEX
        .captures(lower)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().chars().next())
}

/// Keyword matching for the license families the engine knows by name.
///
/// Order matters: the LGPL and AGPL checks run before the GPL check because their names contain "gpl".
fn match_known_family(lower: &str) -> Option<&'static str> {
    if lower.contains("agpl") || lower.contains("affero") {
        return Some("agpl-3");
    }

    if lower.contains("lgpl") || lower.contains("lesser general public") || lower.contains("library general public") {
        return Some(if gpl_version(lower) == Some('3') { "lgpl-3" } else { "lgpl-2.1" });
    }

    if lower.contains("gpl") || lower.contains("general public license") {
        return Some(if gpl_version(lower) == Some('2') { "gpl-2" } else { "gpl-3" });
    }

    if MPL_REGEX.is_match(lower) {
        return Some("mpl-2");
    }

    if lower.contains("apache") {
        return Some("apache-2");
    }

    if MIT_REGEX.is_match(lower) {
        return Some("mit");
    }

    if BSD_REGEX.is_match(lower) {
        return Some("bsd");
    }

    None
}

fn class_of_known(token: &str) -> LicenseClass {
    match token {
        "mit" | "apache-2" | "bsd" => LicenseClass::Permissive,
        "gpl-2" | "gpl-3" | "lgpl-2.1" | "lgpl-3" | "agpl-3" | "mpl-2" => LicenseClass::Copyleft,
        NO_LICENSE => LicenseClass::NoLicense,
        _ => LicenseClass::Unknown,
    }
}

fn spdx_lookup(text: &str) -> Option<NormalizedLicense> {
    let id = spdx::license_id(text).or_else(|| spdx::imprecise_license_id(text).map(|(id, _)| id))?;

    let class = if id.is_copyleft() {
        LicenseClass::Copyleft
    } else if id.is_osi_approved() || id.is_fsf_free_libre() {
        LicenseClass::Permissive
    } else {
        LicenseClass::Unknown
    };

    Some(NormalizedLicense {
        token: id.name.to_ascii_lowercase(),
        class,
    })
}

fn slug(lower: &str) -> String {
    let mut slug = String::with_capacity(lower.len().min(MAX_SLUG_LEN));
    for c in lower.chars() {
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }

        if c.is_ascii_alphanumeric() || c == '.' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_spellings() {
        assert_eq!(normalize("MIT License"), "mit");
        assert_eq!(normalize("mit"), "mit");
        assert_eq!(normalize("Apache License 2.0"), "apache-2");
        assert_eq!(normalize("apache-2.0"), "apache-2");
        assert_eq!(normalize("BSD-3-Clause"), "bsd");
        assert_eq!(normalize("GPL-3.0-or-later"), "gpl-3");
        assert_eq!(normalize("GPLv2"), "gpl-2");
        assert_eq!(normalize("GNU General Public License"), "gpl-3");
    }

    #[test]
    fn lesser_and_affero_do_not_collide_with_gpl() {
        assert_eq!(normalize("LGPL-2.1"), "lgpl-2.1");
        assert_eq!(normalize("GNU Lesser General Public License v3"), "lgpl-3");
        assert_eq!(normalize("AGPL-3.0"), "agpl-3");
    }

    #[test]
    fn gpl_version_comes_from_the_name_not_other_digits() {
        assert_eq!(normalize("GNU GPL v2, Copyright (c) 2023 Acme"), "gpl-2");
        assert_eq!(normalize("GPL-2.0-only (2013 release)"), "gpl-2");
        assert_eq!(normalize("GNU General Public License, version 2, section 3"), "gpl-2");
        assert_eq!(normalize("LGPL-2.1 (2013)"), "lgpl-2.1");
        assert_eq!(normalize("LGPLv3, 2012 edition"), "lgpl-3");
        assert_eq!(normalize("GPL, revised 2022"), "gpl-3");
    }

    #[test]
    fn mit_requires_a_word_boundary() {
        assert_ne!(normalize("submit your own terms"), "mit");
        assert_ne!(normalize("see the example terms"), "mpl-2");
    }

    #[test]
    fn missing_licenses_map_to_no_license() {
        assert_eq!(normalize(""), NO_LICENSE);
        assert_eq!(normalize("   "), NO_LICENSE);
        assert_eq!(normalize("None"), NO_LICENSE);
        assert_eq!(normalize("no-license"), NO_LICENSE);
        assert_eq!(analyze("unknown").class, LicenseClass::NoLicense);
    }

    #[test]
    fn normalization_is_idempotent_for_known_tokens() {
        for token in ["mit", "apache-2", "bsd", "gpl-2", "gpl-3", "lgpl-2.1", "lgpl-3", "agpl-3", "mpl-2", NO_LICENSE] {
            assert_eq!(normalize(token), token, "token {token} should normalize to itself");
        }
    }

    #[test]
    fn unknown_text_yields_best_effort_token() {
        let token = normalize("Acme Research Terms (v7)!");
        assert!(!token.is_empty());
        assert!(!token.contains(' '));
    }

    #[test]
    fn known_families_are_classified() {
        assert_eq!(analyze("MIT").class, LicenseClass::Permissive);
        assert_eq!(analyze("GPL-2.0").class, LicenseClass::Copyleft);
        assert_eq!(analyze("MPL-2.0").class, LicenseClass::Copyleft);
    }
}
