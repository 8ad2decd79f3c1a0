//! Narrative validation — the output constraint layer.
//!
//! A parsed [`ShortlistNarrative`] is still untrusted: the collaborator
//! can rank companies the funnel never produced, drop half the list, or
//! return an empty rationale. These rules catch that before anything
//! reaches a user. Hallucinated ids are a hard reject; omissions are
//! logged and tolerated.

use std::collections::HashSet;

use dealscope_pipeline::CompanyCandidate;

use crate::narrative::ShortlistNarrative;

/// Validation outcome for one narrative.
#[derive(Clone, Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

#[derive(Clone, Debug)]
pub struct Violation {
    pub rule: &'static str,
    pub detail: String,
    pub severity: Severity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Narrative must be discarded and regenerated (or degraded to
    /// the deterministic view).
    Reject,
    /// Narrative can proceed; the violation is logged.
    Warn,
}

/// Validate a shortlist narrative against the shortlist it claims to
/// describe.
pub fn validate_shortlist_narrative(
    narrative: &ShortlistNarrative,
    shortlist: &[CompanyCandidate],
) -> ValidationResult {
    let mut violations = Vec::new();

    let known_ids: HashSet<&str> = shortlist.iter().map(|c| c.record.id.as_str()).collect();

    // Every ranked id must exist in the funnel output. An id the
    // funnel never produced is fabricated data, not an opinion.
    for id in &narrative.ranked_ids {
        if !known_ids.contains(id.as_str()) {
            violations.push(Violation {
                rule: "UNKNOWN_COMPANY_ID",
                detail: format!(
                    "Narrative ranks company '{}' which is not in the shortlist.",
                    id
                ),
                severity: Severity::Reject,
            });
        }
    }

    // Duplicated ids double-count a candidate in the ranking.
    let mut seen: HashSet<&str> = HashSet::new();
    for id in &narrative.ranked_ids {
        if !seen.insert(id.as_str()) {
            violations.push(Violation {
                rule: "DUPLICATE_COMPANY_ID",
                detail: format!("Narrative ranks company '{}' more than once.", id),
                severity: Severity::Reject,
            });
        }
    }

    // A narrative that skips candidates is acceptable but noted.
    if narrative.ranked_ids.len() < shortlist.len() {
        violations.push(Violation {
            rule: "INCOMPLETE_RANKING",
            detail: format!(
                "Narrative covers {} of {} shortlisted companies.",
                narrative.ranked_ids.len(),
                shortlist.len()
            ),
            severity: Severity::Warn,
        });
    }

    if narrative.rationale.trim().is_empty() {
        violations.push(Violation {
            rule: "EMPTY_RATIONALE",
            detail: "Narrative provides a ranking with no rationale.".into(),
            severity: Severity::Reject,
        });
    }

    let valid = !violations.iter().any(|v| v.severity == Severity::Reject);
    ValidationResult { valid, violations }
}
