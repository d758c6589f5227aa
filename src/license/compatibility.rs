use super::normalize::{LicenseClass, NormalizedLicense, analyze};
use serde::{Deserialize, Serialize};

/// Whether an artifact's license can be used under a target license for a given purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseDecision {
    pub model_license: String,
    pub target_license: String,
    pub compatible: bool,
    pub reason: String,
    pub restrictions: Vec<String>,
}

impl LicenseDecision {
    /// Numeric form of the decision: 1.0 when freely compatible, 0.5 when compatible with restrictions, 0.0 otherwise.
    #[must_use]
    pub fn score(&self) -> f64 {
        match (self.compatible, self.restrictions.is_empty()) {
            (true, true) => 1.0,
            (true, false) => 0.5,
            (false, _) => 0.0,
        }
    }
}

/// Decide whether an artifact licensed under `model_license` can be used in a project licensed under
/// `target_license` for `use_case` (free text such as `fine-tune+inference`).
///
/// Both licenses are normalized first; `None` is treated as no license at all. The rules apply in order:
///
/// 1. neither side has a license: incompatible
/// 2. both permissive: compatible
/// 3. both copyleft: compatible with restrictions
/// 4. permissive artifact into a copyleft target: incompatible
/// 5. copyleft artifact into a permissive target: compatible with restrictions
/// 6. anything else: compatible with restrictions
#[must_use]
pub fn check(model_license: Option<&str>, target_license: Option<&str>, use_case: &str) -> LicenseDecision {
    let model = analyze(model_license.unwrap_or_default());
    let target = analyze(target_license.unwrap_or_default());

    let (compatible, reason, mut restrictions) = match (model.class, target.class) {
        (LicenseClass::NoLicense, LicenseClass::NoLicense) => (false, "no licenses found for the artifact or the target".to_string(), Vec::new()),

        (LicenseClass::Permissive, LicenseClass::Permissive) => (
            true,
            format!("both '{}' and '{}' are permissive licenses", model.token, target.token),
            Vec::new(),
        ),

        (LicenseClass::Copyleft, LicenseClass::Copyleft) => (
            true,
            format!("both '{}' and '{}' are copyleft licenses", model.token, target.token),
            copyleft_restrictions(&model),
        ),

        (LicenseClass::Permissive, LicenseClass::Copyleft) => (
            false,
            format!(
                "permissive license '{}' is not compatible with copyleft target '{}'",
                model.token, target.token
            ),
            Vec::new(),
        ),

        (LicenseClass::Copyleft, LicenseClass::Permissive) => (
            true,
            format!(
                "copyleft license '{}' can be used with permissive target '{}' under its own terms",
                model.token, target.token
            ),
            copyleft_restrictions(&model),
        ),

        _ => (
            true,
            format!(
                "compatibility of '{}' with '{}' could not be determined; assuming compatible with restrictions",
                model.token, target.token
            ),
            unclassified_restrictions(&model, &target),
        ),
    };

    if !restrictions.is_empty() {
        restrictions.extend(use_case_restrictions(&model, use_case));
    }

    LicenseDecision {
        model_license: model.token,
        target_license: target.token,
        compatible,
        reason,
        restrictions,
    }
}

fn copyleft_restrictions(model: &NormalizedLicense) -> Vec<String> {
    vec![
        format!("derivative works must be distributed under '{}' or a compatible license", model.token),
        "source code of modifications must be made available on distribution".to_string(),
    ]
}

fn unclassified_restrictions(model: &NormalizedLicense, target: &NormalizedLicense) -> Vec<String> {
    let mut restrictions = Vec::new();
    for license in [model, target] {
        match license.class {
            LicenseClass::NoLicense => restrictions.push("no license declared; usage rights are unclear".to_string()),
            LicenseClass::Unknown => restrictions.push(format!("license '{}' requires manual review", license.token)),
            LicenseClass::Permissive | LicenseClass::Copyleft => {}
        }
    }

    restrictions.dedup();
    restrictions
}

fn use_case_restrictions(model: &NormalizedLicense, use_case: &str) -> Vec<String> {
    let use_case = use_case.to_ascii_lowercase();
    let mut restrictions = Vec::new();

    if use_case.contains("fine-tune") || use_case.contains("finetune") || use_case.contains("fine_tune") {
        restrictions.push(format!("fine-tuned weights remain subject to the '{}' terms", model.token));
    }

    if use_case.contains("commercial") {
        restrictions.push(format!("commercial use must be confirmed against the '{}' terms", model.token));
    }

    restrictions
}
