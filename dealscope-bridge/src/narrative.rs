//! Narrative collaborator interface and defensive response parsing.
//!
//! The collaborator's contract is loose by nature: "given structured
//! input, return semantically consistent narrative or JSON — not
//! guaranteed to be deterministic or schema-valid". Everything here is
//! written against that contract: the input side is fully typed, and
//! the output side assumes the worst.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use dealscope_engine::EstimationResult;
use dealscope_pipeline::CompanyCandidate;

use crate::error::BridgeResult;

// ---------------------------------------------------------------------------
// Outbound: structured prompt payloads
// ---------------------------------------------------------------------------

/// One shortlist entry as the collaborator sees it: just enough to
/// reason about, nothing it could leak that the funnel didn't produce.
#[derive(Clone, Debug, Serialize)]
pub struct ShortlistEntry {
    pub company_id: String,
    pub name: String,
    pub industry_code: String,
    pub pre_score: f64,
    pub rank: usize,
}

impl From<&CompanyCandidate> for ShortlistEntry {
    fn from(candidate: &CompanyCandidate) -> Self {
        Self {
            company_id: candidate.record.id.clone(),
            name: candidate.record.name.clone(),
            industry_code: candidate.record.industry_code.clone(),
            pre_score: candidate.score_or_zero(),
            rank: candidate.rank.unwrap_or(0),
        }
    }
}

/// Structured input for one collaborator invocation.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrativeInput {
    /// Qualitative review of a funnel shortlist against buyer notes.
    ShortlistReview {
        buyer_notes: Option<String>,
        entries: Vec<ShortlistEntry>,
    },
    /// Narrative for one company's estimation summary.
    CompanyDeepDive { estimation: EstimationResult },
}

impl NarrativeInput {
    pub fn shortlist(candidates: &[CompanyCandidate], buyer_notes: Option<String>) -> Self {
        NarrativeInput::ShortlistReview {
            buyer_notes,
            entries: candidates.iter().map(ShortlistEntry::from).collect(),
        }
    }

    /// Serialize the payload for the prompt body.
    pub fn to_prompt_json(&self) -> BridgeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The narrative collaborator as the core sees it: one method, raw
/// text back. Implementations own transport, retries and timeouts —
/// none of that belongs in the deterministic core.
#[async_trait]
pub trait NarrativeClient: Send + Sync {
    async fn summarize(&self, input: &NarrativeInput) -> BridgeResult<String>;
}

// ---------------------------------------------------------------------------
// Inbound: expected shapes and defensive parsing
// ---------------------------------------------------------------------------

/// The JSON shape requested for a shortlist review.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ShortlistNarrative {
    /// Company ids in the collaborator's suggested order.
    pub ranked_ids: Vec<String>,
    pub rationale: String,
}

/// The JSON shape requested for a company deep dive.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CompanyNarrative {
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub risk_notes: Vec<String>,
}

/// What actually came back from the collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum NarrativeOutcome<T> {
    /// Parsed into the requested shape.
    Parsed(T),
    /// Readable text, but not the requested JSON. Still presentable as
    /// prose; never trusted as data.
    Unstructured(String),
    /// Nothing usable came back.
    Unavailable,
}

impl<T> NarrativeOutcome<T> {
    pub fn as_parsed(&self) -> Option<&T> {
        match self {
            NarrativeOutcome::Parsed(value) => Some(value),
            _ => None,
        }
    }
}

/// Parse collaborator output into the requested shape, degrading
/// instead of failing.
///
/// Attempts, in order: the whole text as JSON; the contents of the
/// first fenced code block; the first `{...}` spanning object. A text
/// that resists all three is kept as [`NarrativeOutcome::Unstructured`];
/// blank output is [`NarrativeOutcome::Unavailable`].
pub fn parse_narrative<T: DeserializeOwned>(raw: &str) -> NarrativeOutcome<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NarrativeOutcome::Unavailable;
    }

    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return NarrativeOutcome::Parsed(value);
    }

    if let Some(fenced) = extract_fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(fenced) {
            return NarrativeOutcome::Parsed(value);
        }
    }

    if let Some(object) = extract_json_object(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(object) {
            return NarrativeOutcome::Parsed(value);
        }
    }

    log::warn!(
        "narrative collaborator returned non-conforming output ({} chars); degrading to prose",
        trimmed.len()
    );
    NarrativeOutcome::Unstructured(trimmed.to_string())
}

/// Contents of the first ``` fenced block, tolerating a language tag.
fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// The first balanced `{...}` span, if any.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_json_parses() {
        let raw = r#"{"ranked_ids": ["cmp-1", "cmp-2"], "rationale": "strong sector fit"}"#;
        let outcome: NarrativeOutcome<ShortlistNarrative> = parse_narrative(raw);
        let parsed = outcome.as_parsed().expect("should parse");
        assert_eq!(parsed.ranked_ids, vec!["cmp-1", "cmp-2"]);
    }

    #[test]
    fn fenced_json_parses() {
        let raw = "Here is my analysis:\n```json\n{\"ranked_ids\": [\"cmp-1\"], \"rationale\": \"fit\"}\n```\nHope that helps!";
        let outcome: NarrativeOutcome<ShortlistNarrative> = parse_narrative(raw);
        assert!(outcome.as_parsed().is_some());
    }

    #[test]
    fn embedded_object_parses() {
        let raw = "Sure! The result is {\"headline\": \"Solid target\", \"summary\": \"Good convergence.\"} as requested.";
        let outcome: NarrativeOutcome<CompanyNarrative> = parse_narrative(raw);
        let parsed = outcome.as_parsed().expect("should parse");
        assert_eq!(parsed.headline, "Solid target");
        assert!(parsed.risk_notes.is_empty());
    }

    #[test]
    fn prose_degrades_to_unstructured() {
        let raw = "I could not produce JSON but the company looks healthy overall.";
        let outcome: NarrativeOutcome<ShortlistNarrative> = parse_narrative(raw);
        assert_eq!(outcome, NarrativeOutcome::Unstructured(raw.to_string()));
    }

    #[test]
    fn malformed_json_degrades_instead_of_erroring() {
        let raw = r#"{"ranked_ids": ["cmp-1", "rationale": oops"#;
        let outcome: NarrativeOutcome<ShortlistNarrative> = parse_narrative(raw);
        assert!(matches!(outcome, NarrativeOutcome::Unstructured(_)));
    }

    #[test]
    fn blank_output_is_unavailable() {
        let outcome: NarrativeOutcome<ShortlistNarrative> = parse_narrative("   \n  ");
        assert_eq!(outcome, NarrativeOutcome::Unavailable);
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_extraction() {
        let raw = "note {\"headline\": \"uses { and } freely\", \"summary\": \"ok\"} end";
        let outcome: NarrativeOutcome<CompanyNarrative> = parse_narrative(raw);
        assert_eq!(outcome.as_parsed().unwrap().headline, "uses { and } freely");
    }
}
